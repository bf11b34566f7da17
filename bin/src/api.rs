//! HTTP routes and the JSON response envelope.

use std::any::Any;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use breakline_lib::prelude::*;
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Uniform response body: `{"status": "success", "data": …}` or
/// `{"status": "error", "error": …}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum Envelope<T> {
    /// Successful result.
    Success {
        /// Payload.
        data: T,
    },
    /// Failed result.
    Error {
        /// Human-readable message.
        error: String,
    },
}

impl<T> Envelope<T> {
    /// Wraps a pipeline outcome.
    pub(crate) fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(err) => Self::Error {
                error: err.to_string(),
            },
        }
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    client: ForecastClient,
}

/// Builds the application router.
pub(crate) fn router(client: ForecastClient) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/surf/:spot_id", get(surf))
        .fallback(not_found)
        .with_state(AppState { client })
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Maps a pipeline error to its HTTP status.
pub(crate) fn status_for(err: &ForecastError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Turns a handler panic into an `Unexpected error` envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked".to_string()
    };
    let err = ForecastError::Unexpected(detail);
    tracing::error!(error = %err, "request handler panicked");

    let body: Envelope<()> = Envelope::Error {
        error: err.to_string(),
    };
    (status_for(&err), Json(body)).into_response()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Surf API is running"
    }))
}

async fn surf(State(state): State<AppState>, Path(spot_id): Path<String>) -> Response {
    tracing::info!(spot = %spot_id, "surf report requested");
    match surf_report(&state.client, &spot_id).await {
        Ok(report) => Json(Envelope::Success { data: report }).into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(spot = %spot_id, error = %err, "surf report failed");
            } else {
                tracing::warn!(spot = %spot_id, error = %err, "surf report rejected");
            }
            let body: Envelope<()> = Envelope::Error {
                error: err.to_string(),
            };
            (status, Json(body)).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::Error {
            error: "Route not found".to_string(),
        }),
    )
}
