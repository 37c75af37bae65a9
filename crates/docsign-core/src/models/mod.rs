//! Domain models and HTTP data transfer objects.

pub mod signing;
pub mod submission;

pub use signing::{ResendResponse, SignRequest, SignResponse};
pub use submission::{Submission, UploadResponse};
