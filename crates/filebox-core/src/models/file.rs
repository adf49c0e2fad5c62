use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata for one uploaded file.
///
/// Created once per successful upload, after the blob is already in storage.
/// Records are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Monotonically assigned identifier, never reused.
    pub id: i64,
    /// Caller-supplied grouping tag (`product_id` on the wire).
    pub application_code: String,
    /// Filename as supplied by the client.
    pub original_filename: String,
    /// Key of the blob in object storage.
    pub storage_key: String,
    /// Server-assigned insert time.
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

/// Values supplied when inserting a record; id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub application_code: String,
    pub original_filename: String,
    pub storage_key: String,
}

impl NewFileRecord {
    pub fn new(
        application_code: impl Into<String>,
        original_filename: impl Into<String>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            application_code: application_code.into(),
            original_filename: original_filename.into(),
            storage_key: storage_key.into(),
        }
    }
}

/// Search result entry. The storage key stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileSummary {
    pub id: i64,
    /// Application code the file was uploaded under
    pub product_id: String,
    /// Original filename
    pub filename: String,
    pub upload_date: DateTime<Utc>,
}

impl From<FileRecord> for FileSummary {
    fn from(record: FileRecord) -> Self {
        FileSummary {
            id: record.id,
            product_id: record.application_code,
            filename: record.original_filename,
            upload_date: record.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub msg: String,
    pub file_id: i64,
}

impl UploadResponse {
    pub fn uploaded(file_id: i64) -> Self {
        UploadResponse {
            msg: "File uploaded successfully".to_string(),
            file_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<FileSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadResponse {
    #[serde(rename = "downloadUrl")]
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileRecord {
        FileRecord {
            id: 1,
            application_code: "APP-42".to_string(),
            original_filename: "spec.pdf".to_string(),
            storage_key: "uploads/abc/spec.pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_uses_wire_field_names_and_hides_storage_key() {
        let json = serde_json::to_value(FileSummary::from(record())).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["product_id"], "APP-42");
        assert_eq!(json["filename"], "spec.pdf");
        assert!(json.get("upload_date").is_some());
        assert!(json.get("storage_key").is_none());
        assert!(json.get("storage_path").is_none());
    }

    #[test]
    fn test_download_response_is_camel_case() {
        let json = serde_json::to_value(DownloadResponse {
            download_url: "https://example.test/spec.pdf?sig=1".to_string(),
        })
        .unwrap();
        assert_eq!(json["downloadUrl"], "https://example.test/spec.pdf?sig=1");
    }

    #[test]
    fn test_upload_response_shape() {
        let json = serde_json::to_value(UploadResponse::uploaded(7)).unwrap();
        assert_eq!(json["file_id"], 7);
        assert_eq!(json["msg"], "File uploaded successfully");
    }
}
