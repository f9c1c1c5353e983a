mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use stream_resolver::api::handlers::resolve_handler;
use stream_resolver::application::resolver::ResolvePolicy;
use stream_resolver::infrastructure::cache::MemoryCache;

use common::FakeBackend;

fn test_app(state: stream_resolver::state::AppState) -> Router {
    Router::new()
        .route("/resolve", post(resolve_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_resolve_success_envelope() {
    let backend = Arc::new(FakeBackend::always_ok());
    let state = common::create_test_state(backend);
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/resolve")
        .json(&json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {
                "title": "T",
                "thumbnail": null,
                "duration": 213,
                "stream_url": "https://cdn/x"
            }
        })
    );
}

#[tokio::test]
async fn test_resolve_invalid_url_is_error_envelope_without_extraction() {
    let backend = Arc::new(FakeBackend::always_ok());
    let state = common::create_test_state(backend.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/resolve")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
    assert!(body.get("data").is_none());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_resolve_empty_url_is_error_envelope() {
    let backend = Arc::new(FakeBackend::always_ok());
    let state = common::create_test_state(backend.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server.post("/resolve").json(&json!({ "url": "" })).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["status"], "error");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_resolve_unavailable_video_single_attempt() {
    let backend = Arc::new(FakeBackend::new(|_| {
        Err(common::extractor_failure("ERROR: Video unavailable"))
    }));
    let state = common::create_test_state(backend.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/resolve")
        .json(&json!({ "url": "https://www.youtube.com/watch?v=gone" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_resolve_is_idempotent_within_ttl() {
    let backend = Arc::new(FakeBackend::always_ok());
    let state = common::create_test_state(backend.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let url = json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" });
    let first = server.post("/resolve").json(&url).await;
    let second = server.post("/resolve").json(&url).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(
        first.json::<serde_json::Value>(),
        second.json::<serde_json::Value>()
    );
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_resolve_cache_expiry_triggers_re_extraction() {
    let backend = Arc::new(FakeBackend::always_ok());
    let policy = ResolvePolicy {
        cache_ttl_override: Some(Duration::from_millis(30)),
        ..common::test_policy()
    };
    let state = common::create_test_state_with(
        backend.clone(),
        Arc::new(MemoryCache::new(64)),
        policy,
    );
    let server = TestServer::new(test_app(state)).unwrap();

    let url = json!({ "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ" });
    server.post("/resolve").json(&url).await.assert_status_ok();

    tokio::time::sleep(Duration::from_millis(80)).await;

    server.post("/resolve").json(&url).await.assert_status_ok();
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_resolve_oversized_url_is_transport_error() {
    let backend = Arc::new(FakeBackend::always_ok());
    let state = common::create_test_state(backend.clone());
    let server = TestServer::new(test_app(state)).unwrap();

    let response = server
        .post("/resolve")
        .json(&json!({ "url": format!("https://example.com/{}", "a".repeat(9000)) }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(backend.calls(), 0);
}
