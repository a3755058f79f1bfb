//! Shared helpers for HTTP-level integration tests.
//!
//! Tests run against the real router wired to a seeded in-memory record
//! store, so every request exercises the same handler, error-mapping, and
//! engine path production uses, minus the network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use copydesk_api::config::ApiConfig;
use copydesk_api::router::build_router;
use copydesk_api::state::AppState;
use copydesk_engine::CategoryManager;
use copydesk_events::NotificationHub;
use copydesk_store::MemoryRecordStore;

/// Build a test `ApiConfig` with safe defaults (no env access).
pub fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        store_url: "http://unused.invalid".to_string(),
        categories_collection: "categories".to_string(),
        articles_collection: "articles".to_string(),
    }
}

/// Seed one category into the store.
pub fn seed_category(store: &MemoryRecordStore, id: &str, name: &str, sort_order: i32) {
    store.insert(
        "categories",
        json!({
            "id": id,
            "name": name,
            "slug": name.to_lowercase(),
            "sort_order": sort_order,
            "is_active": true,
        }),
    );
}

/// Seed one referencing article.
pub fn seed_article(store: &MemoryRecordStore, id: &str, category: &str) {
    store.insert(
        "articles",
        json!({"id": id, "title": "headline", "category": category}),
    );
}

/// Build the application router around the given store, with the cache
/// pre-warmed from it.
pub async fn build_test_app(store: Arc<MemoryRecordStore>) -> Router {
    let config = test_config();
    let mut manager = CategoryManager::new(
        store,
        config.collection_names(),
        NotificationHub::default(),
    );
    manager.refresh().await.expect("seeded load must succeed");

    build_router(AppState::new(manager), &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body was not JSON")
}

/// Assert status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
