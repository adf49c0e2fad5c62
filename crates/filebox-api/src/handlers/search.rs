use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use filebox_core::models::{FileSummary, SearchResponse};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "files",
    params(
        ("q" = String, Query, description = "Application code to match exactly")
    ),
    responses(
        (status = 200, description = "Matching files, oldest first", body = SearchResponse),
        (status = 400, description = "Query required", body = ErrorResponse),
        (status = 500, description = "DB error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "search_files"))]
pub async fn search_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, HttpAppError> {
    let records = state
        .files
        .search(query.q.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(SearchResponse {
        results: records.into_iter().map(FileSummary::from).collect(),
    }))
}
