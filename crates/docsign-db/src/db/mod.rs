//! Repositories for submission metadata
//!
//! `submission/` holds the repository trait and its backends; `factory` picks a backend
//! from configuration.

pub mod factory;
pub mod submission;

pub use factory::create_submission_repository;
#[cfg(feature = "postgres")]
pub use factory::setup_database;
#[cfg(feature = "postgres")]
pub use submission::PgSubmissionRepository;
pub use submission::{StorageSubmissionRepository, SubmissionRepository};
