//! Serve command implementation
//!
//! Runs the HTTP API and the periodic scheduler until a shutdown signal.

use crate::api::{self, AppState};
use crate::cli::commands::{build_engine, exit_code_for, load_or_report, open_store};
use crate::core::SyncScheduler;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Disable the periodic sync regardless of configuration
    #[arg(long)]
    pub no_schedule: bool,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        tracing::info!(
            backend = ?config.store_backend,
            address = %config.server.bind_address(),
            "Starting erpsync server"
        );

        let store = match open_store(&config).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let engine = match build_engine(&config, store) {
            Ok(e) => e,
            Err(code) => return Ok(code),
        };

        let scheduler = if config.sync.schedule_enabled && !self.no_schedule {
            Some(SyncScheduler::new(engine.clone(), config.sync.interval()).start())
        } else {
            tracing::info!("Periodic sync disabled");
            None
        };

        let shutdown = async move {
            let _ = shutdown_signal.wait_for(|stop| *stop).await;
        };

        let served = api::serve(&config.server, AppState::new(engine), shutdown).await;

        if let Some(handle) = scheduler {
            if let Err(e) = handle.shutdown().await {
                tracing::error!(error = %e, "Scheduler did not stop cleanly");
            }
        }

        match served {
            Ok(()) => {
                tracing::info!("erpsync server stopped");
                Ok(0)
            }
            Err(e) => {
                println!("❌ HTTP server failed");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
