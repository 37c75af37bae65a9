use validator::ValidateEmail;

use crate::error::AppError;
use crate::messages;

pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MAX_EXTENSION_LENGTH: usize = 16;
pub const MAX_SIGNER_NAME_LENGTH: usize = 200;

/// Trim and syntactically validate a recipient address.
///
/// A blank address is reported with the "file and email required" message, a malformed one
/// with the invalid-email message.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_string();
    if email.is_empty() {
        return Err(AppError::InvalidRequest(
            messages::UPLOAD_FIELDS_REQUIRED.to_string(),
        ));
    }
    if !email.validate_email() {
        return Err(AppError::InvalidRequest(messages::INVALID_EMAIL.to_string()));
    }
    Ok(email)
}

/// Trimmed signer name, or `None` when absent or blank.
pub fn normalize_signer_name(raw: Option<&str>) -> Option<String> {
    let name = raw?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.chars().take(MAX_SIGNER_NAME_LENGTH).collect())
}

/// Strip directory components and control characters from a client-supplied filename.
///
/// Non-ASCII letters are kept so Hebrew filenames survive for the signed-copy attachment name.
pub fn sanitize_filename(filename: &str) -> String {
    let name_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let sanitized: String = name_only
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FILENAME_LENGTH)
        .collect();

    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return "document".to_string();
    }
    sanitized
}

/// Lowercase extension of `filename`, without the dot.
///
/// Returns an empty string when there is no usable extension. Only ASCII alphanumerics are
/// accepted since the extension becomes part of a storage key.
pub fn file_extension(filename: &str) -> String {
    let Some((stem, ext)) = filename.rsplit_once('.') else {
        return String::new();
    };
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LENGTH
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return String::new();
    }
    ext.to_ascii_lowercase()
}
