//! Application state shared by all handlers.

use crate::services::FileService;
use filebox_core::Config;
use filebox_db::FileRepository;
use filebox_storage::{LocalStorage, Storage};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub file_repository: FileRepository,
}

/// Configured storage backend.
#[derive(Clone)]
pub struct StorageState {
    pub backend: Arc<dyn Storage>,
    /// Set when the local backend is active; used to verify and serve `/objects` requests.
    pub local: Option<LocalStorage>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub storage: StorageState,
    pub files: FileService,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool, storage: StorageState) -> Self {
        let file_repository = FileRepository::new(pool.clone());
        let files = FileService::new(
            file_repository.clone(),
            storage.backend.clone(),
            Duration::from_secs(config.signed_url_ttl_secs()),
        );

        AppState {
            config,
            db: DbState {
                pool,
                file_repository,
            },
            storage,
            files,
        }
    }
}
