//! Domain models
//!
//! A single entity, `FileRecord`, plus the wire types the API returns for it.

mod file;

pub use file::{
    DownloadResponse, FileRecord, FileSummary, NewFileRecord, SearchResponse, UploadResponse,
};
