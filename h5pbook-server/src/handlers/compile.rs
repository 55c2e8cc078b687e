//! Compile handler

use super::{error_response, task_failed};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use h5pbook_core::compile::PACKAGE_MIME_TYPE;
use h5pbook_core::{package_file_name, H5pBookError, Template};

/// Sanitize a filename for Content-Disposition header
fn sanitize_filename(name: &str, max_len: usize) -> String {
    name.chars()
        .take(max_len)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_' || *c == '.')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Compile an uploaded source document.
///
/// Multipart fields: `source` (required, UTF-8 Markdown) and `template`
/// (optional `.h5p`; the configured default is used when absent).
pub async fn compile_book(
    State(state): State<AppState>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<Response, (StatusCode, String)> {
    let mut source: Option<(String, Vec<u8>)> = None;
    let mut template: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "source" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "book.md".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                source = Some((filename, data.to_vec()));
            }
            "template" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                template = Some(data.to_vec());
            }
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let (filename, source) =
        source.ok_or_else(|| (StatusCode::BAD_REQUEST, "No source provided".to_string()))?;
    let source = String::from_utf8(source).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Source must be UTF-8 text".to_string(),
        )
    })?;

    // Template validation and compiling are CPU-bound
    let bytes = tokio::task::spawn_blocking(move || -> Result<_, (StatusCode, String)> {
        let uploaded = template
            .map(Template::from_bytes)
            .transpose()
            .map_err(|e| error_response(H5pBookError::from(e)))?;

        let compiler = state.compiler_for(uploaded).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "No template provided and no default template configured".to_string(),
            )
        })?;

        compiler.compile(&source).map_err(error_response)
    })
    .await
    .map_err(task_failed)??;

    let download_name = sanitize_filename(&package_file_name(&filename), 100);
    tracing::info!("Compiled {} ({} bytes)", download_name, bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PACKAGE_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
