//! Template inspection handlers

use super::{error_response, task_failed};
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use h5pbook_core::{H5pBookError, Template, TemplateReport};

/// Report on a template sent as the raw request body
pub async fn inspect_template(body: Bytes) -> Result<Json<TemplateReport>, (StatusCode, String)> {
    if body.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No template provided".to_string()));
    }

    let template = tokio::task::spawn_blocking(move || Template::from_bytes(body.to_vec()))
        .await
        .map_err(task_failed)?
        .map_err(|e| error_response(H5pBookError::from(e)))?;

    Ok(Json(template.report()))
}

/// Report on the configured default template
pub async fn default_template(
    State(state): State<AppState>,
) -> Result<Json<TemplateReport>, StatusCode> {
    let compiler = state.default_compiler.ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(compiler.template().report()))
}
