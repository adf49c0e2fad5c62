use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use filebox_core::models::DownloadResponse;
use filebox_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/download/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File id returned by /upload")
    ),
    responses(
        (status = 200, description = "Time-limited download URL", body = DownloadResponse),
        (status = 400, description = "Invalid file id", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Error creating signed URL", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DownloadResponse>, HttpAppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid file id".to_string()))?;

    let download_url = state.files.download_url(id).await?;

    Ok(Json(DownloadResponse { download_url }))
}
