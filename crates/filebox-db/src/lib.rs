//! Filebox metadata store
//!
//! SQLite-backed repositories for file metadata plus pool construction and
//! the embedded schema migrations.

pub mod db;

pub use db::{connect_pool, FileRepository, MIGRATOR};
