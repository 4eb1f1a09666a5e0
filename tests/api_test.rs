//! Integration tests for the HTTP API

use axum::body::Body;
use axum::http::{Request, StatusCode};
use erpsync::adapters::crm::ScriptedCrm;
use erpsync::adapters::store::MemoryStore;
use erpsync::api::{router, AppState};
use erpsync::core::sync::{RetryPolicy, SyncEngine};
use erpsync::domain::seed_customers;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app(store: &MemoryStore, crm: ScriptedCrm) -> axum::Router {
    let engine = SyncEngine::with_policy(
        Arc::new(store.clone()),
        Arc::new(crm),
        2,
        RetryPolicy::new(3, Duration::ZERO),
    )
    .unwrap();
    router(AppState::new(Arc::new(engine)))
}

async fn send(app: axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_manual_sync_returns_summary() {
    let store = MemoryStore::with_customers(seed_customers());
    let app = app(&store, ScriptedCrm::always_succeed());

    let (status, body) = send(app, "POST", "/sync").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Manual sync completed");
    assert_eq!(body["summary"]["processed"], 2);
    assert_eq!(body["summary"]["succeeded"], 2);
    assert_eq!(body["summary"]["failed"], 0);
    assert!(store.customers().iter().all(|c| c.synced));
}

#[tokio::test]
async fn test_manual_sync_with_failed_records_still_completes() {
    let store = MemoryStore::with_customers(seed_customers());
    let app = app(&store, ScriptedCrm::always_fail());

    let (status, body) = send(app, "POST", "/sync").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["failed"], 2);
}

#[tokio::test]
async fn test_manual_sync_store_down() {
    let store = MemoryStore::with_customers(seed_customers());
    store.set_unavailable(true);
    let app = app(&store, ScriptedCrm::always_succeed());

    let (status, body) = send(app, "POST", "/sync").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Sync failed" }));
}

#[tokio::test]
async fn test_logs_newest_first() {
    let store = MemoryStore::with_customers(seed_customers());
    let app = app(&store, ScriptedCrm::always_succeed());

    send(app.clone(), "POST", "/sync").await;
    let (status, body) = send(app, "GET", "/logs").await;

    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["status"], "SUCCESS");
    assert_eq!(entries[0]["record_id"], 2);
    assert_eq!(entries[1]["record_id"], 1);
    assert_eq!(
        entries[1]["payload"],
        r#"{"customerId":1,"name":"Rahul","phone":"9876543210"}"#
    );
    assert!(entries[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_health_up_and_down() {
    let store = MemoryStore::new();
    let app = app(&store, ScriptedCrm::always_succeed());

    let (status, body) = send(app.clone(), "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "UP" }));

    store.set_unavailable(true);
    let (status, body) = send(app, "GET", "/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "status": "DOWN" }));
}

#[tokio::test]
async fn test_unknown_route() {
    let store = MemoryStore::new();
    let app = app(&store, ScriptedCrm::always_succeed());

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
