//! Docsign API Library
//!
//! HTTP handlers, services and application setup for the upload and signing workflow.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use services::{NewSubmission, SigningService, SubmissionReceipt, SubmissionService};
pub use state::AppState;
