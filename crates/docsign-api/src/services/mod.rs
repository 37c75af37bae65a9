//! Workflow services behind the HTTP handlers.

pub mod signing;
pub mod submission;

pub use signing::{SignedDocument, SigningService};
pub use submission::{NewSubmission, SubmissionReceipt, SubmissionService};
