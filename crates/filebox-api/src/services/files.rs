//! Upload, search and signed-download flows.
//!
//! Upload is two-phase: the blob is written to object storage first, then the
//! metadata row is inserted. There is no transaction spanning both. When the
//! insert fails the blob stays in storage with no row pointing at it; the key is
//! logged so it can be found, and nothing cleans it up.

use filebox_core::models::{FileRecord, NewFileRecord};
use filebox_core::AppError;
use filebox_db::FileRepository;
use filebox_storage::{generate_storage_key, Storage};
use std::sync::Arc;
use std::time::Duration;

pub const UPLOAD_FIELDS_REQUIRED: &str = "File and Application Code required";
pub const QUERY_REQUIRED: &str = "Query required";
pub const FILE_NOT_FOUND: &str = "File not found";

/// A file part received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

#[derive(Clone)]
pub struct FileService {
    repository: FileRepository,
    storage: Arc<dyn Storage>,
    signed_url_ttl: Duration,
}

impl FileService {
    pub fn new(
        repository: FileRepository,
        storage: Arc<dyn Storage>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            storage,
            signed_url_ttl,
        }
    }

    pub fn repository(&self) -> &FileRepository {
        &self.repository
    }

    /// Store the blob, then record its metadata.
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename, size_bytes = file.data.len()))]
    pub async fn upload(
        &self,
        application_code: String,
        file: UploadedFile,
    ) -> Result<FileRecord, AppError> {
        if application_code.is_empty() || file.data.is_empty() {
            return Err(AppError::InvalidInput(UPLOAD_FIELDS_REQUIRED.to_string()));
        }

        let storage_key = generate_storage_key(&file.filename);

        self.storage
            .upload(&storage_key, &file.content_type, file.data)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_key = %storage_key, "Storage upload failed");
                AppError::Storage(e.to_string())
            })?;

        let record = self
            .repository
            .create(NewFileRecord::new(
                application_code,
                file.filename,
                storage_key.clone(),
            ))
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    storage_key = %storage_key,
                    "Metadata insert failed after upload; blob is orphaned in storage"
                );
                e
            })?;

        tracing::info!(
            file_id = record.id,
            application_code = %record.application_code,
            storage_key = %record.storage_key,
            "File uploaded"
        );

        Ok(record)
    }

    /// Records whose application code matches `query` exactly.
    pub async fn search(&self, query: &str) -> Result<Vec<FileRecord>, AppError> {
        if query.is_empty() {
            return Err(AppError::InvalidInput(QUERY_REQUIRED.to_string()));
        }
        self.repository.find_by_application_code(query).await
    }

    /// Signed URL for the record's blob, valid for the configured window.
    #[tracing::instrument(skip(self))]
    pub async fn download_url(&self, id: i64) -> Result<String, AppError> {
        let record = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))?;

        self.storage
            .get_presigned_url(record.storage_key(), self.signed_url_ttl)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_key = %record.storage_key(), "Failed to sign download URL");
                AppError::ExternalService(e.to_string())
            })
    }
}
