//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use filebox_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filebox API",
        version = "0.1.0",
        description = "Upload files tagged with an application code, look them up by code, and fetch them through time-limited signed URLs."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::search::search_files,
        handlers::download::download_file,
    ),
    components(
        schemas(
            models::UploadResponse,
            models::SearchResponse,
            models::FileSummary,
            models::DownloadResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "File upload, search and download")
    )
)]
pub struct ApiDoc;
