use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::ApiError;
use crate::store::RecordStore;

/// Header carrying the shared secret on every request.
pub const API_KEY_HEADER: &str = "api-key";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub api_key: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub store: RecordStore,
    pub auth: ServerAuthConfig,
}

/// Middleware: require an `api-key` header equal to the configured shared
/// secret. Mismatch or absence short-circuits with 401 before any dispatch.
pub async fn require_api_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == state.auth.api_key => Ok(next.run(req).await),
        _ => Err(ApiError::Unauthorized),
    }
}
