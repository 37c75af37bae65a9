//! Upload intake: persist the document and its record, then email the signing link.

use chrono::Utc;
use docsign_core::models::Submission;
use docsign_core::validation::{file_extension, normalize_email, sanitize_filename};
use docsign_core::{messages, AppError, Config};
use docsign_db::SubmissionRepository;
use docsign_services::Notifier;
use docsign_storage::keys::{content_type_for, document_key};
use docsign_storage::Storage;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// A document as received from the upload form.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: Option<String>,
    pub recipient_email: String,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub signing_link: String,
}

#[derive(Clone)]
pub struct SubmissionService {
    config: Arc<Config>,
    storage: Arc<dyn Storage>,
    repository: Arc<dyn SubmissionRepository>,
    notifier: Notifier,
}

impl SubmissionService {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn SubmissionRepository>,
        notifier: Notifier,
    ) -> Self {
        Self {
            config,
            storage,
            repository,
            notifier,
        }
    }

    /// Store an uploaded document and send its signing link.
    ///
    /// All input checks run before anything is written. A notifier failure leaves the
    /// submission in place and is reported as `NotificationFailed` carrying its id.
    #[tracing::instrument(skip(self, upload), fields(size_bytes = upload.data.len()))]
    pub async fn submit(&self, upload: NewSubmission) -> Result<SubmissionReceipt, AppError> {
        if upload.data.is_empty() {
            return Err(AppError::InvalidRequest(
                messages::UPLOAD_FIELDS_REQUIRED.to_string(),
            ));
        }
        let recipient_email = normalize_email(&upload.recipient_email)?;
        let max_size = self.config.storage.max_upload_size_bytes;
        if upload.data.len() > max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "{} bytes exceeds max {} bytes",
                upload.data.len(),
                max_size
            )));
        }

        let start = Instant::now();
        let id = Uuid::new_v4();
        let original_name = sanitize_filename(&upload.original_name);
        let extension = file_extension(&original_name);
        let storage_key = document_key(id, &extension);
        let content_type = upload
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| content_type_for(&storage_key).to_string());
        let file_size = upload.data.len() as i64;

        self.storage
            .put(&storage_key, upload.data, &content_type)
            .await?;

        let submission = Submission {
            id,
            original_name,
            recipient_email,
            storage_key: storage_key.clone(),
            extension,
            content_type,
            file_size,
            created_at: Utc::now(),
        };

        if let Err(e) = self.repository.create(&submission).await {
            if let Err(cleanup) = self.storage.delete(&storage_key).await {
                tracing::warn!(
                    error = %cleanup,
                    storage_key = %storage_key,
                    "Failed to remove orphaned upload"
                );
            }
            return Err(e);
        }

        tracing::info!(
            submission_id = %id,
            storage_key = %storage_key,
            duration_ms = start.elapsed().as_millis() as u64,
            "Submission stored"
        );

        let signing_link = self.config.signing_link(&id);
        self.notify(&submission, &signing_link).await?;

        Ok(SubmissionReceipt { id, signing_link })
    }

    /// Send the signing link again for an existing submission.
    #[tracing::instrument(skip(self))]
    pub async fn resend_link(&self, id: &str) -> Result<SubmissionReceipt, AppError> {
        let id = parse_submission_id(id)?;
        let submission = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string()))?;

        let signing_link = self.config.signing_link(&id);
        self.notify(&submission, &signing_link).await?;

        Ok(SubmissionReceipt { id, signing_link })
    }

    async fn notify(&self, submission: &Submission, signing_link: &str) -> Result<(), AppError> {
        self.notifier
            .send_signing_link(&submission.recipient_email, signing_link)
            .await
            .map_err(|e| AppError::NotificationFailed {
                reason: e.to_string(),
                submission_id: Some(submission.id),
                download_url: None,
            })
    }
}

/// Ids that are not UUIDs cannot name a submission.
pub(crate) fn parse_submission_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_submission_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_submission_id(&format!(" {} ", id)).unwrap(), id);

        let err = parse_submission_id("does-not-exist").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == messages::DOCUMENT_NOT_FOUND));
    }
}
