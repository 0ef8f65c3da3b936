use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use wikifetch::api::create_router;
use wikifetch::gateway::{GatewayError, SearchGateway};
use wikifetch::query_engine::QueryEngine;

struct FixedGateway(&'static str);

#[async_trait]
impl SearchGateway for FixedGateway {
    async fn fetch(&self, _query: &str) -> Result<String, GatewayError> {
        Ok(self.0.to_string())
    }
}

struct PanickingGateway;

#[async_trait]
impl SearchGateway for PanickingGateway {
    async fn fetch(&self, _query: &str) -> Result<String, GatewayError> {
        panic!("gateway blew up");
    }
}

const RUST_PAGES: &str = r#"{"query":{"pages":{
    "1":{"index":1,"title":"Rust (programming language)","extract":"Rust is a language.","fullurl":"https://en.wikipedia.org/wiki/Rust_(programming_language)"},
    "2":{"index":2,"title":"Rust","extract":"Rust is an iron oxide.","fullurl":"https://en.wikipedia.org/wiki/Rust"}
}}}"#;

fn search_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(gateway: impl SearchGateway + 'static, body: Value) -> (StatusCode, Vec<u8>) {
    let router = create_router(Arc::new(QueryEngine::new(Arc::new(gateway))));
    let response = router.oneshot(search_request(body)).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_search_success() {
    let (status, body) = send(FixedGateway(RUST_PAGES), json!({ "query": "rust" })).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["query"], "rust");
    assert_eq!(body["status"], "success");
    assert_eq!(body["article"]["title"], "Rust (programming language)");
    assert_eq!(
        body["article"]["link"],
        "https://en.wikipedia.org/wiki/Rust_(programming_language)"
    );
    assert_eq!(body["suggestions"], json!(["Rust"]));
    assert!(body["processing_time_ms"].is_u64());
}

#[tokio::test]
async fn test_search_failure_is_still_ok_response() {
    let (status, body) = send(FixedGateway("{}"), json!({ "query": "xyz" })).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "failure");
    assert_eq!(body["message"], "No results found for 'xyz'.");
    assert!(body.get("article").is_none());
}

#[tokio::test]
async fn test_blank_query_rejected() {
    let (status, body) = send(FixedGateway(RUST_PAGES), json!({ "query": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Please enter a search term.");
}

#[tokio::test]
async fn test_engine_panic_becomes_server_error() {
    let (status, body) = send(PanickingGateway, json!({ "query": "rust" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "An unexpected error occurred.");
}

#[tokio::test]
async fn test_router_routes_and_cors() {
    let router = create_router(Arc::new(QueryEngine::new(Arc::new(FixedGateway(RUST_PAGES)))));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/no-such-page.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut request = search_request(json!({ "query": "rust" }));
    request
        .headers_mut()
        .insert("origin", "https://elsewhere.example".parse().unwrap());
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
