use async_trait::async_trait;
use docsign_core::models::Submission;
use docsign_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::SubmissionRepository;

#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    #[tracing::instrument(skip(self, submission), fields(db.table = "submissions", db.operation = "insert", db.record_id = %submission.id))]
    async fn create(&self, submission: &Submission) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO submissions
                (id, original_name, recipient_email, storage_key, extension, content_type, file_size, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(submission.id)
        .bind(&submission.original_name)
        .bind(&submission.recipient_email)
        .bind(&submission.storage_key)
        .bind(&submission.extension)
        .bind(&submission.content_type)
        .bind(submission.file_size)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Internal(
                format!("Submission {} already exists", submission.id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "submissions", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<Submission>, AppError> {
        let submission = sqlx::query_as::<Postgres, Submission>(
            r#"
            SELECT id, original_name, recipient_email, storage_key, extension, content_type, file_size, created_at
            FROM submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM submissions WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
