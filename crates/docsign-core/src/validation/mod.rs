//! Input validation shared by the HTTP layer and the services.

pub mod input;

pub use input::{
    file_extension, normalize_email, normalize_signer_name, sanitize_filename,
    MAX_EXTENSION_LENGTH, MAX_FILENAME_LENGTH, MAX_SIGNER_NAME_LENGTH,
};
