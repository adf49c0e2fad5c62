use crate::error::{ErrorResponse, HttpAppError};
use crate::services::files::UPLOAD_FIELDS_REQUIRED;
use crate::state::AppState;
use crate::utils::upload::{extract_upload_form, validate_file_size};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use filebox_core::models::UploadResponse;
use filebox_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: `file` (binary) and `product_id` (text)"),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "File and Application Code required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage upload failed or DB error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    // Bodies that are not multipart at all cannot carry the required fields.
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Upload body is not multipart");
        AppError::InvalidInput(UPLOAD_FIELDS_REQUIRED.to_string())
    })?;
    let form = extract_upload_form(multipart).await?;

    let (Some(file), Some(product_id)) = (form.file, form.product_id) else {
        return Err(AppError::InvalidInput(UPLOAD_FIELDS_REQUIRED.to_string()).into());
    };

    validate_file_size(file.data.len(), state.config.max_upload_size_bytes())?;

    let record = state.files.upload(product_id, file).await?;

    Ok(Json(UploadResponse::uploaded(record.id)))
}
