//! Storage backend setup

use crate::state::StorageState;
use anyhow::{Context, Result};
use filebox_core::{Config, StorageBackend};
use filebox_storage::{create_local_storage, create_storage};
use std::sync::Arc;

/// Build the configured backend. The local backend is also kept as its
/// concrete type so `/objects` can verify signatures and stream blobs.
pub async fn setup_storage(config: &Config) -> Result<StorageState> {
    let state = match config.storage_backend() {
        StorageBackend::Local => {
            let local = create_local_storage(config)
                .await
                .context("Failed to initialize local storage")?;
            tracing::info!(
                path = %config.local_storage_path(),
                public_base_url = %config.public_base_url(),
                "Local storage initialized"
            );
            StorageState {
                backend: Arc::new(local.clone()),
                local: Some(local),
            }
        }
        StorageBackend::S3 => {
            let backend = create_storage(config)
                .await
                .context("Failed to initialize S3 storage")?;
            tracing::info!(
                bucket = %config.s3_bucket(),
                region = %config.s3_region(),
                endpoint = ?config.s3_endpoint(),
                "S3 storage initialized"
            );
            StorageState {
                backend,
                local: None,
            }
        }
    };

    Ok(state)
}
