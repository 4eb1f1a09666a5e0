//! Sync audit log entries

use crate::domain::ids::{LogEntryId, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal outcome recorded for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SyncStatus {
    /// The record was pushed to the CRM and flagged as synced
    Success,
    /// Every attempt failed; the record stays unsynced
    Failed,
}

impl SyncStatus {
    /// Column value stored in `sync_logs.status`
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "SUCCESS",
            SyncStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(SyncStatus::Success),
            "FAILED" => Ok(SyncStatus::Failed),
            other => Err(format!(
                "Invalid sync status '{other}'. Must be one of: SUCCESS, FAILED"
            )),
        }
    }
}

/// A row of the append-only sync log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncLogEntry {
    /// Store-assigned id
    pub id: LogEntryId,

    /// Customer row the entry describes
    pub record_id: Option<RecordId>,

    /// Serialized [`SyncPayload`](crate::domain::SyncPayload)
    pub payload: String,

    /// Outcome
    pub status: SyncStatus,

    /// Insert time assigned by the store
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_column_value() {
        for status in [SyncStatus::Success, SyncStatus::Failed] {
            assert_eq!(SyncStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert_eq!(SyncStatus::from_str("failed").unwrap(), SyncStatus::Failed);
        assert!(SyncStatus::from_str("PENDING").is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&SyncStatus::Success).unwrap(),
            "\"SUCCESS\""
        );
    }
}
