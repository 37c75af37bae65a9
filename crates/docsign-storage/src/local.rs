use crate::keys;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Blob store rooted at a directory on the local disk.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Open the store, creating `base_path` if needed.
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blobs (e.g., "uploads")
    /// * `base_url` - Base URL the blobs are served from (e.g., "http://localhost:5000/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map a validated key to a path that stays under `base_path`.
    ///
    /// Rejects keys that could escape the base directory or collide with in-flight
    /// temporary files.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        keys::validate_key(storage_key)
            .map_err(|reason| StorageError::InvalidKey(reason.to_string()))?;

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        // Existing paths may be symlinks; make sure they still resolve inside the base.
        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Sibling temp path: `.{name}.{uuid}.tmp` in the same directory, so the final rename
    /// never crosses filesystems.
    fn temp_path_for(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_atomically(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        let temp_path = Self::temp_path_for(path);

        let result: StorageResult<()> = async {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(data).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.sync_all().await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to sync file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            fs::rename(&temp_path, path).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to move {} into place: {}",
                    path.display(),
                    e
                ))
            })
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();
        self.write_atomically(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(self.url_for(key))
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage get successful"
        );

        Ok(data)
    }

    async fn get_stream(&self, key: &str) -> StorageResult<ByteStream> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let key = key.to_string();
        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream read error"
                );
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let probe = self
            .base_path
            .join(format!(".health-{}.tmp", Uuid::new_v4()));
        fs::write(&probe, b"ok").await?;
        fs::remove_file(&probe).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Arc;
    use tempfile::tempdir;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:5000/uploads".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_put_get() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = b"%PDF-1.5 test".to_vec();
        let url = storage
            .put("abc.pdf", data.clone(), "application/pdf")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:5000/uploads/abc.pdf");
        assert_eq!(storage.get("abc.pdf").await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_put_creates_nested_directories() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage
            .put("submissions/abc.json", b"{}".to_vec(), "application/json")
            .await
            .unwrap();

        assert!(dir.path().join("submissions/abc.json").exists());
    }

    #[tokio::test]
    async fn test_put_replaces_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage.put("x.pdf", b"first".to_vec(), "application/pdf").await.unwrap();
        storage.put("x.pdf", b"second".to_vec(), "application/pdf").await.unwrap();

        assert_eq!(storage.get("x.pdf").await.unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["x.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_puts_leave_a_complete_blob() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(storage_in(dir.path()).await);

        let a = vec![b'a'; 256 * 1024];
        let b = vec![b'b'; 256 * 1024];
        let (ra, rb) = tokio::join!(
            {
                let storage = storage.clone();
                let a = a.clone();
                async move { storage.put("race.pdf", a, "application/pdf").await }
            },
            {
                let storage = storage.clone();
                let b = b.clone();
                async move { storage.put("race.pdf", b, "application/pdf").await }
            }
        );
        ra.unwrap();
        rb.unwrap();

        let stored = storage.get("race.pdf").await.unwrap();
        assert!(stored == a || stored == b);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.get("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.put("a\\b.pdf", vec![1], "application/pdf").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        assert!(matches!(
            storage.get("missing.pdf").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.get_stream("missing.pdf").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(!storage.exists("missing.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        assert!(storage.delete("nonexistent/file.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_stream_download() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = b"%PDF-1.4 streamed body".to_vec();
        storage.put("stream.pdf", data.clone(), "application/pdf").await.unwrap();

        let mut stream = storage.get_stream("stream.pdf").await.unwrap();
        let mut downloaded = Vec::new();
        while let Some(chunk_result) = stream.next().await {
            downloaded.extend_from_slice(&chunk_result.unwrap());
        }

        assert_eq!(data, downloaded);
    }

    #[tokio::test]
    async fn test_health_check_leaves_directory_clean() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage.health_check().await.unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
