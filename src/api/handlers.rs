use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ResolveError;
use crate::query_engine::QueryEngine;

use super::models::{SearchRequest, SearchResponse};

pub async fn search_handler(
    State(query_engine): State<Arc<QueryEngine>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, ResolveError::EmptyQuery.to_string()));
    }

    // Run on its own task so a panic inside the engine becomes a 500 instead
    // of tearing down the connection.
    let query = request.query.clone();
    let result = tokio::spawn(async move { query_engine.resolve(&query).await })
        .await
        .map_err(|e| {
            tracing::error!(query = %request.query, error = %e, "search task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            )
        })?;

    Ok(Json(SearchResponse {
        query: request.query,
        result,
        processing_time_ms: start.elapsed().as_millis(),
    }))
}
