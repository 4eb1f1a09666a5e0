//! HTTP server

use crate::api::handlers::{health_check, list_logs, trigger_sync, AppState};
use crate::config::ServerConfig;
use crate::domain::{ErpSyncError, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower_http::trace::TraceLayer;

/// Build the router with every route and the request tracing layer
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sync", post(trigger_sync))
        .route("/logs", get(list_logs))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until `shutdown` resolves
///
/// In-flight requests, including a running manual sync, complete before this
/// returns.
///
/// # Errors
///
/// Returns an I/O error if the listener can't be bound or the server fails.
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ErpSyncError::Io(format!("Failed to bind {address}: {e}")))?;

    tracing::info!(address = %address, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ErpSyncError::Io(format!("HTTP server failed: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
