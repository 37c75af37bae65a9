//! Docsign Storage Library
//!
//! Blob store for uploaded documents, signed artifacts and (with the default metadata
//! backend) submission records.
//!
//! # Storage key format
//!
//! All keys are generated by the [`keys`] module:
//!
//! - **Original upload**: `{id}.{ext}` (or `{id}` when the upload had no extension)
//! - **Signed artifact**: `{id}_signed.pdf`
//! - **Submission record**: `submissions/{id}.json`
//!
//! Keys must be relative, must not contain `..` or backslashes and no segment may start
//! with a dot (temporary files use that prefix).

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
