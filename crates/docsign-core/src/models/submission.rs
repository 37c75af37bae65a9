use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One uploaded document awaiting signature.
///
/// Created on upload and read during signing; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Submission {
    pub id: Uuid,
    /// Filename as uploaded (already stripped of any path components).
    pub original_name: String,
    pub recipient_email: String,
    /// Key of the original blob in storage.
    pub storage_key: String,
    /// Lowercase extension without the leading dot; empty when the upload had none.
    pub extension: String,
    pub content_type: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Name used for the signed copy attachment: `<original stem>_signed.pdf`.
    pub fn signed_file_name(&self) -> String {
        let stem = match self.original_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.original_name.as_str(),
        };
        format!("{}_signed.pdf", stem)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub id: Uuid,
}
