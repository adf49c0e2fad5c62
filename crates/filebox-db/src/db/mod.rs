//! Database repositories for data access layer
//
// File metadata (the `files` table)
pub mod file;
//
// Pool construction and migrations
pub mod pool;

pub use file::FileRepository;
pub use pool::{connect_pool, MIGRATOR};
