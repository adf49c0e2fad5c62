//! Business logic shared by the HTTP handlers.

pub mod files;

pub use files::{FileService, UploadedFile};
