//! Error types module
//!
//! All failures in the upload/sign workflow are unified under [`AppError`]. Each variant
//! self-describes how it is presented over HTTP through [`ErrorMetadata`].
//!
//! The `Database` variant carries a `sqlx::Error` only when the `sqlx` feature is enabled.

use std::io;

use uuid::Uuid;

use crate::messages;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Level at which the HTTP boundary records an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Client mistakes: bad input, unknown ids, oversize uploads
    Debug,
    /// Warning level - for failures of external collaborators (SMTP)
    Warn,
    /// Operator or server faults
    Error,
}

/// How an error is rendered to clients and logged.
pub trait ErrorMetadata {
    /// Response status
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether the same request may succeed if retried
    fn is_recoverable(&self) -> bool;

    /// Message shown to the user, in Hebrew
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input. The payload is the client-facing message.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    RequestTimeout(String),

    /// Stored bytes do not parse as a usable document.
    #[error("Document load failed: {0}")]
    DocumentLoadFailed(String),

    /// The signature font is missing or unreadable. Operator misconfiguration.
    #[error("Signature font unavailable: {0}")]
    FontUnavailable(String),

    /// The domain operation succeeded but the email could not be delivered.
    #[error("Notification failed: {reason}")]
    NotificationFailed {
        reason: String,
        /// Set when an upload was persisted but its link could not be sent.
        submission_id: Option<Uuid>,
        /// Set when a signed artifact was persisted but could not be emailed.
        download_url: Option<String>,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::InvalidRequest(_) => (400, "INVALID_REQUEST", false, false, LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, false, LogLevel::Debug),
        AppError::RequestTimeout(_) => (408, "REQUEST_TIMEOUT", true, false, LogLevel::Warn),
        AppError::DocumentLoadFailed(_) => {
            (500, "DOCUMENT_LOAD_FAILED", false, false, LogLevel::Warn)
        }
        AppError::FontUnavailable(_) => (500, "FONT_UNAVAILABLE", false, true, LogLevel::Error),
        AppError::NotificationFailed { .. } => {
            (500, "NOTIFICATION_FAILED", true, true, LogLevel::Warn)
        }
        AppError::Storage(_) => (500, "STORAGE_ERROR", true, true, LogLevel::Error),
        AppError::Database(_) => (500, "DATABASE_ERROR", true, true, LogLevel::Error),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", true, true, LogLevel::Error)
        }
    }
}

impl AppError {
    /// Variant name, shown in non-production error details
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::RequestTimeout(_) => "RequestTimeout",
            AppError::DocumentLoadFailed(_) => "DocumentLoadFailed",
            AppError::FontUnavailable(_) => "FontUnavailable",
            AppError::NotificationFailed { .. } => "NotificationFailed",
            AppError::Storage(_) => "Storage",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by the `source()` chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }

    /// Submission kept despite the failure, if any.
    pub fn submission_id(&self) -> Option<Uuid> {
        match self {
            AppError::NotificationFailed { submission_id, .. } => *submission_id,
            _ => None,
        }
    }

    /// Signed artifact kept despite the failure, if any.
    pub fn download_url(&self) -> Option<&str> {
        match self {
            AppError::NotificationFailed { download_url, .. } => download_url.as_deref(),
            _ => None,
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => messages::FILE_TOO_LARGE.to_string(),
            AppError::RequestTimeout(_) => messages::REQUEST_TIMED_OUT.to_string(),
            AppError::DocumentLoadFailed(_) | AppError::FontUnavailable(_) => {
                messages::SIGNING_FAILED.to_string()
            }
            AppError::NotificationFailed { download_url, .. } => {
                if download_url.is_some() {
                    messages::SIGNED_COPY_NOT_SENT.to_string()
                } else {
                    messages::UPLOAD_NOTIFICATION_FAILED.to_string()
                }
            }
            AppError::Storage(_) => messages::STORAGE_ERROR.to_string(),
            AppError::Database(_) | AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                messages::INTERNAL_ERROR.to_string()
            }
        }
    }
}
