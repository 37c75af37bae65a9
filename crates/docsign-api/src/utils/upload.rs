//! Multipart parsing for the upload form.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use docsign_core::{messages, AppError};

/// Fields of the upload form. Either may be absent; the service decides what is required.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Read the `file` and `email` fields; unknown fields are skipped.
/// Only one field named "file" is accepted.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidRequest(
                        messages::UPLOAD_FIELDS_REQUIRED.to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "document".to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;

                form.file = Some(UploadedFile {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "email" => {
                form.email = Some(field.text().await.map_err(multipart_error)?);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unexpected upload field");
            }
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        tracing::debug!(error = %err, "Failed to read multipart body");
        AppError::InvalidRequest(messages::UPLOAD_FIELDS_REQUIRED.to_string())
    }
}
