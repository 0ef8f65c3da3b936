use serde::{Deserialize, Serialize};

use crate::data_models::SearchResult;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The query exactly as it was sent, so the page can show it back.
    pub query: String,
    #[serde(flatten)]
    pub result: SearchResult,
    pub processing_time_ms: u128,
}
