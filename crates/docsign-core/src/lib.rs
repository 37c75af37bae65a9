//! Docsign Core Library
//!
//! Domain models, the error taxonomy, configuration and input validation shared by
//! every Docsign crate.

pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{
    Config, MailConfig, MailTransportKind, MetadataBackend, ServerConfig, SigningConfig,
    StorageConfig,
};
pub use error::{AppError, ErrorMetadata, LogLevel};
