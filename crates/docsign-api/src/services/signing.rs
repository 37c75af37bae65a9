//! Signature application: stamp the stored document and publish the signed artifact.

use docsign_core::validation::normalize_signer_name;
use docsign_core::{messages, AppError, Config};
use docsign_db::SubmissionRepository;
use docsign_processing::{DocumentTransformer, TextStamp};
use docsign_services::Notifier;
use docsign_storage::keys::signed_key;
use docsign_storage::Storage;
use std::sync::Arc;
use std::time::Instant;

use super::submission::parse_submission_id;

/// Result of a completed signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDocument {
    pub storage_key: String,
    pub download_url: String,
}

#[derive(Clone)]
pub struct SigningService {
    config: Arc<Config>,
    storage: Arc<dyn Storage>,
    repository: Arc<dyn SubmissionRepository>,
    transformer: Arc<dyn DocumentTransformer>,
    notifier: Notifier,
}

impl SigningService {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn SubmissionRepository>,
        transformer: Arc<dyn DocumentTransformer>,
        notifier: Notifier,
    ) -> Self {
        Self {
            config,
            storage,
            repository,
            transformer,
            notifier,
        }
    }

    /// Stamp `חתימה: <name>` on the last page of the submission's document.
    ///
    /// Every call starts from the original upload and overwrites the previous artifact,
    /// so signing twice leaves only the second name. When the signed copy cannot be
    /// emailed the artifact is kept and its URL travels in `NotificationFailed`.
    #[tracing::instrument(skip(self, name))]
    pub async fn sign(
        &self,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Result<SignedDocument, AppError> {
        let raw_id = id.map(str::trim).filter(|s| !s.is_empty());
        let signer_name = normalize_signer_name(name);
        let (Some(raw_id), Some(signer_name)) = (raw_id, signer_name) else {
            return Err(AppError::InvalidRequest(
                messages::SIGN_FIELDS_REQUIRED.to_string(),
            ));
        };

        let id = parse_submission_id(raw_id)?;
        let submission = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string()))?;

        let start = Instant::now();
        let original = self.storage.get(&submission.storage_key).await?;
        let stamp = TextStamp::signature(&signer_name);
        let signed = self.transformer.apply_stamp(original, &stamp).await?;

        let storage_key = signed_key(id);
        let attachment = self.config.signing.send_signed_copy.then(|| signed.clone());
        self.storage
            .put(&storage_key, signed, "application/pdf")
            .await?;
        let download_url = self.config.download_url(&storage_key);

        tracing::info!(
            submission_id = %id,
            storage_key = %storage_key,
            duration_ms = start.elapsed().as_millis() as u64,
            "Document signed"
        );

        if let Some(pdf) = attachment {
            self.notifier
                .send_signed_copy(
                    &submission.recipient_email,
                    &signer_name,
                    &download_url,
                    &submission.signed_file_name(),
                    pdf,
                )
                .await
                .map_err(|e| AppError::NotificationFailed {
                    reason: e.to_string(),
                    submission_id: Some(id),
                    download_url: Some(download_url.clone()),
                })?;
        }

        Ok(SignedDocument {
            storage_key,
            download_url,
        })
    }
}
