pub mod download;
pub mod objects;
pub mod search;
pub mod upload;
