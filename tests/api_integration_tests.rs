//! Integration Tests for Admin API Endpoints
//!
//! Tests full request/response cycles against the router, with the cache
//! manager driven directly where the API has no write path.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use ttl_cache_manager::{api::create_router, AppState, CacheManager, Config};

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::from_config(&Config::default())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn fetch_stats(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(get("/api/system/cache/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_initial_state() {
    let app = create_router(create_test_state());

    let json = fetch_stats(&app).await;

    assert_eq!(json["totalCleanups"], 0);
    assert!(json["lastCleanup"].is_null());
    assert_eq!(json["memoryBefore"], 0.0);
    assert_eq!(json["memoryAfter"], 0.0);
    assert_eq!(json["queryCacheSize"], 0);
    assert_eq!(json["sessionCacheSize"], 0);
    assert_eq!(json["temporaryDataSize"], 0);
    assert!(json["currentMemoryUsage"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_stats_reflect_store_sizes() {
    let state = create_test_state();
    let cache: Arc<CacheManager<Value>> = state.cache.clone();
    let app = create_router(state);

    cache.set_query("q1", json!({"rows": []}), None).await;
    cache.set_query("q2", json!({"rows": [1]}), None).await;
    cache.set_session("s1", json!({"user": "u"})).await;

    let json = fetch_stats(&app).await;
    assert_eq!(json["queryCacheSize"], 2);
    assert_eq!(json["sessionCacheSize"], 1);
    assert_eq!(json["temporaryDataSize"], 0);
}

// == Cleanup Endpoint Tests ==

#[tokio::test]
async fn test_cleanup_endpoint_twice() {
    let app = create_router(create_test_state());

    for expected_generation in 1..=2 {
        let response = app
            .clone()
            .oneshot(post("/api/system/cache/cleanup"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["report"]["generation"], expected_generation);
    }

    let stats = fetch_stats(&app).await;
    assert_eq!(stats["totalCleanups"], 2);
    assert!(stats["lastCleanup"].is_string());
}

#[tokio::test]
async fn test_cleanup_endpoint_evicts_expired_queries() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    cache
        .set_query("q1", json!("short"), Some(Duration::from_millis(100)))
        .await;
    cache.set_query("q2", json!("long"), None).await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    let response = app
        .clone()
        .oneshot(post("/api/system/cache/cleanup"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["report"]["queryEvicted"], 1);

    let stats = fetch_stats(&app).await;
    assert_eq!(stats["queryCacheSize"], 1);
}

// == Clear Endpoint Tests ==

#[tokio::test]
async fn test_clear_endpoint_keeps_cumulative_stats() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    cache.perform_full_cleanup().await;
    cache.set_session("s1", json!("session")).await;
    cache.set_temporary_data("t1", json!("scratch")).await;

    let before = fetch_stats(&app).await;
    assert_eq!(before["sessionCacheSize"], 1);

    let response = app
        .clone()
        .oneshot(post("/api/system/cache/clear"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["dropped"], 2);

    let after = fetch_stats(&app).await;
    assert_eq!(after["sessionCacheSize"], 0);
    assert_eq!(after["temporaryDataSize"], 0);
    assert_eq!(after["totalCleanups"], before["totalCleanups"]);
    assert_eq!(after["lastCleanup"], before["lastCleanup"]);
}

// == Memory & Health Endpoint Tests ==

#[tokio::test]
async fn test_memory_endpoint() {
    let app = create_router(create_test_state());

    let response = app.oneshot(get("/api/system/memory")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["rssMb"].as_f64().unwrap() >= 0.0);
    assert!(json["virtualMb"].is_number());
    assert!(json["uptimeSecs"].is_u64());
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Lifecycle Tests ==

#[tokio::test]
async fn test_stop_keeps_serving_stats() {
    let state = create_test_state();
    let cache = state.cache.clone();
    let app = create_router(state);

    cache.set_session("s1", json!(1)).await;
    cache.stop();
    cache.stop();
    assert!(!cache.is_running());

    let stats = fetch_stats(&app).await;
    assert_eq!(stats["sessionCacheSize"], 1);
}
