//! Shared key generation for the blob store.
//!
//! Every crate that reads or writes blobs goes through these helpers so the layout stays
//! consistent between the upload, signing and download paths.

use uuid::Uuid;

/// Suffix appended to a submission id for its signed artifact.
pub const SIGNED_SUFFIX: &str = "_signed.pdf";

/// Prefix under which submission records are kept.
pub const SUBMISSIONS_PREFIX: &str = "submissions";

/// Key of the original upload: `{id}.{ext}`, or `{id}` without an extension.
pub fn document_key(id: Uuid, extension: &str) -> String {
    if extension.is_empty() {
        id.to_string()
    } else {
        format!("{}.{}", id, extension)
    }
}

/// Key of the signed artifact: `{id}_signed.pdf`.
pub fn signed_key(id: Uuid) -> String {
    format!("{}{}", id, SIGNED_SUFFIX)
}

/// Key of the JSON submission record: `submissions/{id}.json`.
pub fn metadata_key(id: Uuid) -> String {
    format!("{}/{}.json", SUBMISSIONS_PREFIX, id)
}

/// Structural key check shared by all backends.
pub fn validate_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Storage key is empty");
    }
    if key.starts_with('/') || key.contains('\\') || key.contains("..") {
        return Err("Storage key contains invalid characters");
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment.starts_with('.'))
    {
        return Err("Storage key contains an empty or hidden segment");
    }
    Ok(())
}

/// Whether a key may be served by the public download route.
///
/// Only single-segment keys qualify, which keeps `submissions/*` records private.
pub fn is_public_key(key: &str) -> bool {
    !key.contains('/') && validate_key(key).is_ok()
}

/// Content type inferred from a key's extension.
pub fn content_type_for(key: &str) -> &'static str {
    let extension = key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
