//! Storage doubles for failure paths.

use async_trait::async_trait;
use filebox_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::time::Duration;

/// Backend whose every write and signing request fails.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload(&self, storage_key: &str, _: &str, _: Vec<u8>) -> StorageResult<()> {
        Err(StorageError::UploadFailed(format!(
            "simulated outage writing {}",
            storage_key
        )))
    }

    async fn get_presigned_url(&self, _: &str, _: Duration) -> StorageResult<String> {
        Err(StorageError::SigningFailed("simulated signer outage".to_string()))
    }

    async fn exists(&self, _: &str) -> StorageResult<bool> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
