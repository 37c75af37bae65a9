use docsign_core::{AppError, Config, MetadataBackend};
use docsign_storage::Storage;
use std::sync::Arc;

use super::{StorageSubmissionRepository, SubmissionRepository};

/// Build the submission repository selected by `METADATA_BACKEND`.
pub async fn create_submission_repository(
    config: &Config,
    storage: Arc<dyn Storage>,
) -> Result<Arc<dyn SubmissionRepository>, AppError> {
    match config.storage.metadata_backend {
        MetadataBackend::Storage => {
            tracing::info!("Initializing storage-backed submission repository");
            Ok(Arc::new(StorageSubmissionRepository::new(storage)))
        }

        #[cfg(feature = "postgres")]
        MetadataBackend::Postgres => {
            tracing::info!("Initializing PostgreSQL submission repository");
            let pool = setup_database(config).await?;
            Ok(Arc::new(super::PgSubmissionRepository::new(pool)))
        }

        #[cfg(not(feature = "postgres"))]
        MetadataBackend::Postgres => Err(AppError::Internal(
            "PostgreSQL metadata backend not available (postgres feature not enabled)".to_string(),
        )),
    }
}

/// Connect to Postgres and apply the bundled migrations.
#[cfg(feature = "postgres")]
pub async fn setup_database(config: &Config) -> Result<sqlx::PgPool, AppError> {
    use anyhow::Context;
    use sqlx::postgres::PgPoolOptions;
    use std::path::Path;
    use std::time::Duration;

    let database_url = config
        .storage
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Internal("DATABASE_URL not configured".to_string()))?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.storage.db_max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!(
        max_connections = config.storage.db_max_connections,
        "Database connected successfully"
    );

    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
