//! Multipart parsing for the upload endpoint

use crate::services::UploadedFile;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use filebox_core::AppError;

/// Fields of an upload form. Either may be absent; the service decides what is required.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub product_id: Option<String>,
}

fn multipart_error(e: MultipartError, what: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File exceeds the maximum upload size".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read {}: {}", what, e))
    }
}

/// Read the `file` and `product_id` fields from a multipart form.
/// Only one file part named "file" is accepted; other fields are skipped.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        // A `file` part without a filename is a plain text field, not an upload.
        let filename = field
            .file_name()
            .filter(|name: &&str| !name.is_empty())
            .map(|name: &str| name.to_string());

        match (field_name.as_str(), filename) {
            ("file", Some(filename)) => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let content_type = field
                    .content_type()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "file data"))?;

                form.file = Some(UploadedFile {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            ("product_id", _) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "product_id"))?;
                form.product_id = Some(value);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} bytes",
            max_size
        )));
    }
    Ok(())
}
