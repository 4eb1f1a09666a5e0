//! HTTP request handlers

use crate::core::sync::{SyncEngine, SyncSummary};
use crate::domain::{ErpSyncError, SyncLogEntry};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Engine used by the manual trigger; its store serves logs and health
    pub engine: Arc<SyncEngine>,
}

impl AppState {
    /// Create the state for a sync engine
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        Self { engine }
    }
}

/// Body returned by a successful manual sync
#[derive(Debug, Serialize)]
pub struct ManualSyncResponse {
    /// Fixed confirmation message
    pub message: &'static str,
    /// Counts of the completed run
    pub summary: SyncSummary,
}

/// `POST /sync`: run one sync pass and wait for it
pub async fn trigger_sync(State(state): State<AppState>) -> Response {
    match state.engine.run_sync().await {
        Ok(summary) => Json(ManualSyncResponse {
            message: "Manual sync completed",
            summary,
        })
        .into_response(),
        Err(ErpSyncError::SyncInProgress) => {
            tracing::info!("Manual sync rejected, a run is already in progress");
            (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Sync already in progress" })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Manual sync failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Sync failed" })),
            )
                .into_response()
        }
    }
}

/// `GET /logs`: every sync log entry, newest first
pub async fn list_logs(State(state): State<AppState>) -> Response {
    match state.engine.store().list_logs().await {
        Ok(entries) => Json::<Vec<SyncLogEntry>>(entries).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list sync logs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch logs" })),
            )
                .into_response()
        }
    }
}

/// `GET /health`: `UP` when the record store answers
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.engine.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "UP" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "DOWN" })),
            )
        }
    }
}
