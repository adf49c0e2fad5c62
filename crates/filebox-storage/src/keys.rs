//! Shared key generation for storage backends.
//!
//! Key format: `uploads/{uuid}/{sanitized_filename}`.

use uuid::Uuid;

const MAX_FILENAME_LEN: usize = 255;
const FALLBACK_FILENAME: &str = "file";

/// Generate a fresh storage key for an uploaded file.
///
/// Every call yields a distinct key, even for identical filenames, so
/// concurrent uploads never overwrite each other's blobs.
pub fn generate_storage_key(original_filename: &str) -> String {
    format!(
        "uploads/{}/{}",
        Uuid::new_v4().simple(),
        sanitize_filename(original_filename)
    )
}

/// Reduce a client-supplied filename to a safe single key segment.
///
/// Directory components are dropped, characters outside `[A-Za-z0-9._-]`
/// become `_`, and the result is capped at 255 characters. Names that end up
/// empty or consisting only of dots fall back to `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect();

    if sanitized.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}
