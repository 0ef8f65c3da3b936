use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::query_engine::QueryEngine;

pub mod handlers;
pub mod models;

/// Directory holding the search page, relative to the working directory.
pub const STATIC_DIR: &str = "static";

/// `POST /api/search` resolves a query; every other path is looked up in
/// [`STATIC_DIR`]. The API is open to any origin.
pub fn create_router(query_engine: Arc<QueryEngine>) -> Router {
    let search_api = Router::new()
        .route("/api/search", post(handlers::search_handler))
        .with_state(query_engine);

    let any_origin = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    search_api
        .fallback_service(ServeDir::new(STATIC_DIR))
        .layer(any_origin)
}
