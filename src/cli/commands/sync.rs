//! Sync command implementation
//!
//! Runs a single sync pass and prints the summary.

use crate::cli::commands::{build_engine, exit_code_for, load_or_report, open_store};
use crate::core::sync::SyncSummary;
use clap::Args;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let store = match open_store(&config).await {
            Ok(s) => s,
            Err(code) => return Ok(code),
        };

        let engine = match build_engine(&config, store) {
            Ok(e) => e,
            Err(code) => return Ok(code),
        };

        let summary = match engine.run_sync().await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Sync failed");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(if summary.is_successful() { 0 } else { 1 })
    }
}

fn print_summary(summary: &SyncSummary) {
    let marker = if summary.is_successful() { "✅" } else { "⚠️ " };
    println!("{marker} Sync completed");
    println!();
    println!("  Run ID: {}", summary.run_id);
    println!("  Processed: {}", summary.processed);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Batches: {}", summary.batches);
    println!("  Duration: {} ms", summary.duration.as_millis());
    println!();
}
