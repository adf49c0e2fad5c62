//! Filebox API Library
//!
//! HTTP handlers, services and application setup for the file upload,
//! search and download service.

mod api_doc;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use telemetry::init_telemetry;
