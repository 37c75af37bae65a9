mod storage;
#[cfg(feature = "postgres")]
mod postgres;

pub use storage::StorageSubmissionRepository;
#[cfg(feature = "postgres")]
pub use postgres::PgSubmissionRepository;

use async_trait::async_trait;
use docsign_core::models::Submission;
use docsign_core::AppError;
use uuid::Uuid;

/// Persistence for [`Submission`] records.
///
/// Records are written once on upload and never updated.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new record. Fails with `AppError::Internal` if the id is already taken.
    async fn create(&self, submission: &Submission) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Submission>, AppError>;

    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;
}
