//! Logs command implementation
//!
//! Prints the sync audit log, newest first.

use crate::adapters::store::create_record_store;
use crate::cli::commands::{exit_code_for, load_or_report};
use crate::core::bootstrap::{wait_for_store, StartupOptions};
use crate::domain::{SyncLogEntry, SyncStatus};
use clap::Args;

/// Arguments for the logs command
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Show at most this many entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Only show entries with this status (success or failed)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<SyncStatus>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_status(value: &str) -> Result<SyncStatus, String> {
    value.parse()
}

impl LogsArgs {
    /// Execute the logs command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let store = match create_record_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create record store");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let options = StartupOptions::from_config(&config);
        let entries = match wait_for_store(store.as_ref(), &options).await {
            Ok(()) => store.list_logs().await,
            Err(e) => Err(e),
        };

        let entries = match entries {
            Ok(entries) => filter_logs(entries, self.status, self.limit),
            Err(e) => {
                println!("❌ Failed to read sync logs");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(0);
        }

        if entries.is_empty() {
            println!("No sync log entries");
            return Ok(0);
        }

        println!("📋 Sync Log ({} entries)", entries.len());
        println!();
        for entry in &entries {
            let record = entry
                .record_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:>6}  {}  {:<7}  record {:<6}  {}",
                entry.id,
                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                entry.status,
                record,
                entry.payload
            );
        }
        println!();

        Ok(0)
    }
}

/// Keep entries matching `status`, then the first `limit` of them
pub fn filter_logs(
    entries: Vec<SyncLogEntry>,
    status: Option<SyncStatus>,
    limit: Option<usize>,
) -> Vec<SyncLogEntry> {
    entries
        .into_iter()
        .filter(|e| status.map_or(true, |s| e.status == s))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogEntryId, RecordId};
    use chrono::Utc;

    fn entry(id: i64, status: SyncStatus) -> SyncLogEntry {
        SyncLogEntry {
            id: LogEntryId::new(id),
            record_id: Some(RecordId::new(id)),
            payload: "{}".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<SyncLogEntry> {
        vec![
            entry(4, SyncStatus::Success),
            entry(3, SyncStatus::Failed),
            entry(2, SyncStatus::Success),
            entry(1, SyncStatus::Failed),
        ]
    }

    #[test]
    fn test_filter_by_status() {
        let failed = filter_logs(sample(), Some(SyncStatus::Failed), None);
        let ids: Vec<i64> = failed.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_filter_with_limit() {
        let newest = filter_logs(sample(), None, Some(2));
        let ids: Vec<i64> = newest.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn test_filter_without_options() {
        assert_eq!(filter_logs(sample(), None, None).len(), 4);
    }

    #[test]
    fn test_parse_status_case_insensitive() {
        assert_eq!(parse_status("success").unwrap(), SyncStatus::Success);
        assert_eq!(parse_status("FAILED").unwrap(), SyncStatus::Failed);
        assert!(parse_status("pending").is_err());
    }
}
