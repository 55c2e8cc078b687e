//! Request handlers

mod compile;
mod templates;

pub use compile::*;
pub use templates::*;

use axum::http::StatusCode;
use axum::Json;
use h5pbook_core::H5pBookError;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Map a compiler error onto a status code. Problems with the uploaded
/// source or template are the client's; archive failures are ours.
fn error_response(err: H5pBookError) -> (StatusCode, String) {
    let status = match &err {
        H5pBookError::Parse(_) | H5pBookError::Template(_) => StatusCode::UNPROCESSABLE_ENTITY,
        H5pBookError::Package(_) | H5pBookError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Compile failed: {}", err);
    }
    (status, err.to_string())
}

fn task_failed(e: tokio::task::JoinError) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Task failed: {}", e),
    )
}
