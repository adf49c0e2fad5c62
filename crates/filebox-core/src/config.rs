//! Configuration module
//!
//! Configuration is read from the environment (a `.env` file is loaded first when
//! present) and validated once at startup.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SIGNED_URL_TTL_SECS: u64 = 60 * 60;
const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;
const MIN_SIGNING_SECRET_LEN: usize = 32;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Full service configuration
#[derive(Clone, Debug)]
pub struct FileboxConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, Supabase, etc.)
    pub local_storage_path: String,
    pub public_base_url: String,
    pub signing_secret: Option<String>,
    // Upload / download behaviour
    pub signed_url_ttl_secs: u64,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FileboxConfig>);

impl Config {
    fn inner(&self) -> &FileboxConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FileboxConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_host(&self) -> &str {
        &self.inner().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> &str {
        &self.inner().s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.inner().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> &str {
        &self.inner().local_storage_path
    }

    pub fn public_base_url(&self) -> &str {
        &self.inner().public_base_url
    }

    pub fn signing_secret(&self) -> Option<&str> {
        self.inner().signing_secret.as_deref()
    }

    pub fn signed_url_ttl_secs(&self) -> u64 {
        self.inner().signed_url_ttl_secs
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a numeric setting, using `default` when the variable is unset.
/// A value that is set but malformed is an error rather than a silent default.
fn parse_number<T>(name: &str, value: Option<String>, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a valid number, got {:?}: {}", name, raw, e)),
    }
}

fn env_number<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    parse_number(name, env::var(name).ok(), default)
}

impl FileboxConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port: u16 = env_number("PORT", SERVER_PORT)?;

        let storage_backend: StorageBackend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse()?;

        let config = FileboxConfig {
            base: BaseConfig {
                server_host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                server_port,
                cors_origins: parse_list(
                    &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
                db_max_connections: env_number("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
                db_timeout_seconds: env_number("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
                environment: env::var("ENVIRONMENT")
                    .or_else(|_| env::var("APP_ENV"))
                    .unwrap_or_else(|_| "development".to_string()),
            },
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.sqlite".to_string()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").unwrap_or_else(|_| "files".to_string()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| "./storage".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port)),
            signing_secret: env::var("SIGNING_SECRET").ok().filter(|s| !s.is_empty()),
            signed_url_ttl_secs: env_number("SIGNED_URL_TTL_SECS", SIGNED_URL_TTL_SECS)?,
            max_upload_size_bytes: env_number("MAX_UPLOAD_SIZE_BYTES", MAX_UPLOAD_SIZE_BYTES)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a SQLite connection string (sqlite://...)"
            ));
        }

        if self.signed_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!("SIGNED_URL_TTL_SECS cannot be 0"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES cannot be 0"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_empty() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                match self.signing_secret.as_deref() {
                    Some(secret) if secret.len() >= MIN_SIGNING_SECRET_LEN => {}
                    _ => {
                        return Err(anyhow::anyhow!(
                            "SIGNING_SECRET must be at least {} characters long when using local storage backend",
                            MIN_SIGNING_SECRET_LEN
                        ))
                    }
                }
            }
        }

        Ok(())
    }
}
