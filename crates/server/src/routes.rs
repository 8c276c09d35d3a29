use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Record};

use crate::auth::{self, ServerState};
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: Option<String>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET `/`: every record without `id`, a single record with `?id=<x>`.
async fn get_records(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match query.id {
        None => Ok(Json(json!(state.store.list().await))),
        Some(id) => match state.store.get(&id).await {
            Some(record) => Ok(Json(json!(record))),
            None => Err(ApiError::NotFound(id)),
        },
    }
}

/// POST `/`: parse the body as a record and insert it, answering 201.
/// Any body rejection (bad syntax, wrong shape, missing content type)
/// maps to 400 rather than axum's default 422.
async fn create_record(
    State(state): State<ServerState>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let Json(record) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    state.store.add(record.clone()).await;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT `/?id=<x>`: replace an existing record wholesale; never inserts.
async fn update_record(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<Record>, JsonRejection>,
) -> Result<Json<Record>, ApiError> {
    let id = query.id.ok_or(ApiError::MissingId)?;
    let Json(record) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    if state.store.update(&id, record.clone()).await {
        Ok(Json(record))
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// DELETE `/?id=<x>`: idempotent; absent identifiers still answer 200.
async fn delete_record(
    State(state): State<ServerState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = query.id.ok_or(ApiError::MissingId)?;
    state.store.remove(&id).await;
    Ok(Json(json!({"message": "record deleted"})))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build the full application router: public health route plus the
/// verb-dispatched record route behind the shared-secret gate.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes (health only)
    let public = Router::new().route("/health", get(health));

    // Record routes, single path, verb-dispatched
    let records = Router::new()
        .route(
            "/",
            get(get_records)
                .post(create_record)
                .put(update_record)
                .delete(delete_record)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    // Compose
    public
        .merge(records)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
