//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::requests::StatResponse;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/requests", post(answer_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Answer a batch of stat requests, one response per request in order.
async fn answer_requests(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<StatResponse>>, AppError> {
    // Parse JSON manually so the body can be logged on failure
    let batch: StatBatch = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let mut handler = state.handler.clone().lock_owned().await;
    let responses = tokio::task::spawn_blocking(move || handler.answer_all(&batch.stat_requests))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("request batch failed: {e}"),
        })?;

    Ok(Json(responses))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
