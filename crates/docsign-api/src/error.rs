//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).

use std::sync::OnceLock;

use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docsign_core::{messages, AppError, ErrorMetadata, LogLevel};
use docsign_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Set once at startup; unset means development.
static PRODUCTION_MODE: OnceLock<bool> = OnceLock::new();

/// Record whether error details must be hidden from clients.
///
/// Only the first call has an effect.
pub fn configure_error_details(is_production: bool) {
    if PRODUCTION_MODE.set(is_production).is_err() {
        tracing::debug!("Error detail mode already configured");
    }
}

fn is_production() -> bool {
    PRODUCTION_MODE.get().copied().unwrap_or(false)
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message shown to the user
    pub message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Submission that was kept even though its signing link was not sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Signed document that was kept even though it was not emailed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(error: &AppError, include_details: bool) -> Self {
        Self {
            message: error.client_message(),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            details: include_details.then(|| error.detailed_message()),
            id: error.submission_id(),
            download_url: error.download_url().map(str::to_string),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from docsign-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(err.into())
    }
}

/// JSON body failures are a 400 with the signing message, never axum's default 422.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected JSON body");
        HttpAppError(AppError::InvalidRequest(
            messages::SIGN_FIELDS_REQUIRED.to_string(),
        ))
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected multipart body");
        HttpAppError(AppError::InvalidRequest(
            messages::UPLOAD_FIELDS_REQUIRED.to_string(),
        ))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details never leave the process in production or for sensitive errors.
        let include_details = !is_production() && !app_error.is_sensitive();
        let body = ErrorResponse::from_app_error(app_error, include_details);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error_not_found() {
        let storage_err = StorageError::NotFound("abc.pdf".to_string());
        let HttpAppError(app_err) = storage_err.into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, messages::DOCUMENT_NOT_FOUND),
            _ => panic!("Expected NotFound variant"),
        }
    }

    #[test]
    fn test_from_storage_error_upload_failed() {
        let storage_err = StorageError::UploadFailed("disk full".to_string());
        let HttpAppError(app_err) = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn test_error_response_shape() {
        let err = AppError::InvalidRequest(messages::SIGN_FIELDS_REQUIRED.to_string());
        let response = ErrorResponse::from_app_error(&err, false);
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json.get("message").and_then(|v| v.as_str()),
            Some(messages::SIGN_FIELDS_REQUIRED)
        );
        assert_eq!(
            json.get("code").and_then(|v| v.as_str()),
            Some("INVALID_REQUEST")
        );
        assert_eq!(json.get("recoverable").and_then(|v| v.as_bool()), Some(false));
        assert!(json.get("details").is_none());
        assert!(json.get("id").is_none());
        assert!(json.get("downloadUrl").is_none());
    }

    #[test]
    fn test_notification_failure_exposes_kept_artifact() {
        let id = Uuid::new_v4();
        let err = AppError::NotificationFailed {
            reason: "connection refused".to_string(),
            submission_id: Some(id),
            download_url: Some(format!("http://localhost:5000/uploads/{}_signed.pdf", id)),
        };
        let json = serde_json::to_value(ErrorResponse::from_app_error(&err, true)).unwrap();
        assert_eq!(json["code"], "NOTIFICATION_FAILED");
        assert_eq!(json["id"], id.to_string());
        assert!(json["downloadUrl"]
            .as_str()
            .unwrap()
            .ends_with("_signed.pdf"));
    }

    #[test]
    fn test_details_only_when_requested() {
        let err = AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string());
        let with = ErrorResponse::from_app_error(&err, true);
        let without = ErrorResponse::from_app_error(&err, false);
        assert!(with.details.is_some());
        assert!(without.details.is_none());
    }
}
