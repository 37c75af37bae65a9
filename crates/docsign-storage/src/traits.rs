//! Storage abstraction trait
//!
//! This module defines the Storage trait that all blob store backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result alias used by every `Storage` method.
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked body of a stored blob.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// The submission and signing services only talk to this trait, so the filesystem backend
/// can be swapped without touching them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, replacing any previous blob, and return its public URL.
    ///
    /// Replacement is atomic: readers see either the old or the new blob, and of two
    /// concurrent writers to the same key the last to finish wins.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Read a whole blob. Missing keys are [`StorageError::NotFound`].
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Read a blob as a stream of chunks (for downloads).
    async fn get_stream(&self, key: &str) -> StorageResult<ByteStream>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Remove a blob. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL the blob is served from.
    fn url_for(&self, key: &str) -> String;

    /// Verify the backend is reachable and writable.
    async fn health_check(&self) -> StorageResult<()>;
}

impl From<StorageError> for docsign_core::AppError {
    fn from(err: StorageError) -> Self {
        use docsign_core::{messages, AppError};

        match err {
            StorageError::NotFound(_) => AppError::NotFound(messages::DOCUMENT_NOT_FOUND.to_string()),
            StorageError::InvalidKey(reason) => AppError::InvalidRequest(reason),
            other => AppError::Storage(other.to_string()),
        }
    }
}
