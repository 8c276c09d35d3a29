use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Request-level failures, mapped directly to an HTTP status and a short
/// JSON `{"error": ...}` body at the dispatcher boundary. None are retried
/// and none are fatal to the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid or missing api key")]
    Unauthorized,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("missing `id` query parameter")]
    MissingId,
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MalformedBody(_) | ApiError::MissingId => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
