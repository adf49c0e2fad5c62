//! Filebox Storage Library
//!
//! This crate provides the object storage abstraction used by the upload and
//! download flows, with implementations for S3-compatible providers and the
//! local filesystem.
//!
//! # Storage key format
//!
//! Upload keys are `uploads/{uuid}/{sanitized_filename}`. The random segment
//! makes keys unique per upload without an existence check. Keys must not
//! contain `..` or a leading `/`. Key generation lives in the `keys` module so
//! every backend sees the same layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(feature = "storage-local")]
pub(crate) mod signing;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-local")]
pub use factory::create_local_storage;
pub use factory::create_storage;
pub use filebox_core::StorageBackend;
pub use keys::{generate_storage_key, sanitize_filename};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
