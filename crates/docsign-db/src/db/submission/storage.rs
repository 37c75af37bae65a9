use async_trait::async_trait;
use docsign_core::models::Submission;
use docsign_core::AppError;
use docsign_storage::{keys, Storage, StorageError};
use std::sync::Arc;
use uuid::Uuid;

use super::SubmissionRepository;

/// Keeps each submission as a JSON document next to the blobs (`submissions/{id}.json`).
#[derive(Clone)]
pub struct StorageSubmissionRepository {
    storage: Arc<dyn Storage>,
}

impl StorageSubmissionRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SubmissionRepository for StorageSubmissionRepository {
    #[tracing::instrument(skip(self, submission), fields(db.operation = "insert", db.record_id = %submission.id))]
    async fn create(&self, submission: &Submission) -> Result<(), AppError> {
        let key = keys::metadata_key(submission.id);
        if self.storage.exists(&key).await? {
            return Err(AppError::Internal(format!(
                "Submission {} already exists",
                submission.id
            )));
        }

        let body = serde_json::to_vec_pretty(submission)?;
        self.storage.put(&key, body, "application/json").await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Submission>, AppError> {
        let key = keys::metadata_key(id);
        let body = match self.storage.get(&key).await {
            Ok(body) => body,
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let submission = serde_json::from_slice::<Submission>(&body).map_err(|e| {
            AppError::Internal(format!("Corrupt submission record {}: {}", key, e))
        })?;
        Ok(Some(submission))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.storage.exists(&keys::metadata_key(id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docsign_storage::LocalStorage;
    use tempfile::tempdir;

    fn sample(id: Uuid) -> Submission {
        Submission {
            id,
            original_name: "contract.pdf".to_string(),
            recipient_email: "a@example.com".to_string(),
            storage_key: keys::document_key(id, "pdf"),
            extension: "pdf".to_string(),
            content_type: "application/pdf".to_string(),
            file_size: 1024,
            created_at: Utc::now(),
        }
    }

    async fn repository(dir: &std::path::Path) -> StorageSubmissionRepository {
        let storage = LocalStorage::new(dir, "http://localhost:5000/uploads".to_string())
            .await
            .unwrap();
        StorageSubmissionRepository::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path()).await;
        let submission = sample(Uuid::new_v4());

        repo.create(&submission).await.unwrap();

        assert!(repo.exists(submission.id).await.unwrap());
        assert_eq!(repo.get(submission.id).await.unwrap(), Some(submission));
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path()).await;
        let id = Uuid::new_v4();

        assert_eq!(repo.get(id).await.unwrap(), None);
        assert!(!repo.exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path()).await;
        let submission = sample(Uuid::new_v4());

        repo.create(&submission).await.unwrap();
        let err = repo.create(&submission).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_blob_without_record_is_unknown() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path()).await;
        let id = Uuid::new_v4();

        std::fs::write(dir.path().join(keys::document_key(id, "pdf")), b"%PDF").unwrap();

        assert_eq!(repo.get(id).await.unwrap(), None);
    }
}
