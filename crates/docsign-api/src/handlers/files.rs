use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use docsign_core::{messages, AppError};
use docsign_storage::keys::{content_type_for, is_public_key};
use futures::StreamExt;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Stored file name, e.g. `<id>_signed.pdf`")
    ),
    responses(
        (status = 200, description = "Stored document", content_type = "application/pdf"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Records under submissions/ and anything malformed look the same as a missing file.
    if !is_public_key(&filename) {
        return Err(AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string()).into());
    }

    let stream = state.storage.get_stream(&filename).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_disposition = format!("inline; filename=\"{}\"", filename);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&filename))
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
