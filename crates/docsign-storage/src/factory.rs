use crate::{LocalStorage, Storage, StorageResult};
use docsign_core::Config;
use std::sync::Arc;

/// Create the blob store described by the configuration.
///
/// Blobs are served back by the API under `{SERVER_URL}/uploads`, so that is the public
/// base URL handed to the backend.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let base_url = format!(
        "{}/uploads",
        config.server.server_base_url.trim_end_matches('/')
    );
    let storage = LocalStorage::new(config.storage.upload_dir.clone(), base_url).await?;

    tracing::info!(
        upload_dir = %config.storage.upload_dir.display(),
        "Local blob storage initialized"
    );

    Ok(Arc::new(storage))
}
