//! Docsign DB Library
//!
//! Metadata store for submissions. The repository is the single source of truth for
//! mapping a submission id to its stored blob.

pub mod db;

pub use db::{create_submission_repository, StorageSubmissionRepository, SubmissionRepository};
#[cfg(feature = "postgres")]
pub use db::{setup_database, PgSubmissionRepository};
