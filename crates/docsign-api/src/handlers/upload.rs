use crate::error::{ErrorResponse, HttpAppError};
use crate::services::NewSubmission;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;
use axum::{
    extract::multipart::MultipartRejection,
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use docsign_core::models::UploadResponse;
use docsign_core::{messages, AppError};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "submissions",
    request_body(content_type = "multipart/form-data", description = "Fields `file` (binary) and `email`"),
    responses(
        (status = 200, description = "Document stored and signing link sent", body = UploadResponse),
        (status = 400, description = "Missing file or invalid email", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Signing link could not be sent; `id` is kept", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_document"))]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = extract_upload_form(multipart?).await?;

    let (Some(file), Some(email)) = (form.file, form.email) else {
        return Err(AppError::InvalidRequest(messages::UPLOAD_FIELDS_REQUIRED.to_string()).into());
    };

    let receipt = state
        .submissions
        .submit(NewSubmission {
            data: file.data,
            original_name: file.filename,
            content_type: file.content_type,
            recipient_email: email,
        })
        .await?;

    Ok(Json(UploadResponse {
        message: messages::UPLOAD_SUCCESS.to_string(),
        id: receipt.id,
    }))
}
