//! Serves blobs of the local storage backend behind signed URLs.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use filebox_core::AppError;
use filebox_storage::StorageError;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SignedObjectQuery {
    pub expires: Option<u64>,
    pub signature: Option<String>,
}

/// Stream an object after checking its URL signature and expiry.
#[tracing::instrument(skip(state, query), fields(operation = "get_object"))]
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<SignedObjectQuery>,
) -> Result<Response, HttpAppError> {
    let local = state.storage.local.as_ref().ok_or_else(|| {
        AppError::NotFound("Local object serving is not enabled".to_string())
    })?;

    let (Some(expires), Some(signature)) = (query.expires, query.signature.as_deref()) else {
        return Err(StorageError::InvalidSignature.into());
    };

    local.verify_signed_request(&key, expires, signature)?;

    let stream = local.download_stream(&key).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let filename = key.rsplit('/').next().unwrap_or("file");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CACHE_CONTROL, "private, no-store")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
