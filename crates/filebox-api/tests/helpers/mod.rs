//! Test helpers: build AppState and router for integration tests.
//!
//! Each app gets its own in-memory SQLite database and a temporary local
//! storage root, so tests are isolated and need no external services.

#![allow(dead_code)]

pub mod storage;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use filebox_api::setup::routes;
use filebox_api::state::{AppState, StorageState};
use filebox_core::{BaseConfig, Config, FileboxConfig, StorageBackend};
use filebox_db::{connect_pool, MIGRATOR};
use filebox_storage::{LocalStorage, Storage};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret-0123456789abcdef";
pub const TEST_BASE_URL: &str = "http://localhost:3000";
pub const TEST_MAX_UPLOAD_BYTES: usize = 16 * 1024;

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub async fn file_count(&self) -> i64 {
        self.state
            .db
            .file_repository
            .count()
            .await
            .expect("Failed to count files")
    }
}

pub fn create_test_config(storage_path: &str) -> Config {
    Config(Box::new(FileboxConfig {
        base: BaseConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
        },
        database_url: "sqlite::memory:".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: "files".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        local_storage_path: storage_path.to_string(),
        public_base_url: TEST_BASE_URL.to_string(),
        signing_secret: Some(TEST_SIGNING_SECRET.to_string()),
        signed_url_ttl_secs: 3600,
        max_upload_size_bytes: TEST_MAX_UPLOAD_BYTES,
    }))
}

async fn build_app(temp_dir: TempDir, storage: StorageState) -> TestApp {
    let config = create_test_config(&temp_dir.path().to_string_lossy());

    let pool = connect_pool(config.database_url(), 1, Duration::from_secs(5))
        .await
        .expect("Failed to connect to test database");
    MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = Arc::new(AppState::new(config.clone(), pool, storage));
    let app = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Setup test app with isolated DB and local storage.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let local = LocalStorage::new(
        temp_dir.path(),
        TEST_BASE_URL.to_string(),
        TEST_SIGNING_SECRET.as_bytes(),
    )
    .await
    .expect("Failed to create local storage");

    let storage = StorageState {
        backend: Arc::new(local.clone()),
        local: Some(local),
    };
    build_app(temp_dir, storage).await
}

/// Setup test app whose storage backend is `backend` (no `/objects` route).
pub async fn setup_test_app_with_storage(backend: Arc<dyn Storage>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage = StorageState {
        backend,
        local: None,
    };
    build_app(temp_dir, storage).await
}

pub fn upload_form(product_id: &str, filename: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data.to_vec()))
        .file_name(filename.to_string())
        .mime_type("text/plain");
    MultipartForm::new()
        .add_text("product_id", product_id.to_string())
        .add_part("file", part)
}

/// Upload and return the new file id.
pub async fn upload(client: &TestServer, product_id: &str, filename: &str, data: &[u8]) -> i64 {
    let response = client
        .post("/upload")
        .multipart(upload_form(product_id, filename, data))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    body["file_id"].as_i64().expect("Expected 'file_id' in upload response")
}

/// Fetch a signed local URL through the test server.
pub async fn fetch_signed_url(client: &TestServer, url: &str) -> TestResponse {
    let relative = url
        .strip_prefix(TEST_BASE_URL)
        .expect("Signed URL should start with the public base URL");
    let (path, query) = relative.split_once('?').expect("Signed URL has a query");

    let mut request = client.get(path);
    for pair in query.split('&') {
        let (name, value) = pair.split_once('=').expect("query pair");
        request = request.add_query_param(name, value);
    }
    request.await
}

pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    url.split_once('?')?
        .1
        .split('&')
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}
