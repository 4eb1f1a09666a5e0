//! Sync run summary and reporting

use serde::{Serialize, Serializer};
use std::time::Duration;
use uuid::Uuid;

/// Counts reported by a completed sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Identifier of the run, also recorded on the `sync_run` span
    pub run_id: Uuid,

    /// Records that reached a terminal outcome
    pub processed: usize,

    /// Records committed and flagged as synced
    pub succeeded: usize,

    /// Records that exhausted their attempts
    pub failed: usize,

    /// Batches the fetched records were split into
    pub batches: usize,

    /// Wall time of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl SyncSummary {
    /// Create an empty summary for a run
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            processed: 0,
            succeeded: 0,
            failed: 0,
            batches: 0,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count a committed record
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    /// Count an exhausted record
    pub fn record_failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    /// Check if every processed record was committed
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.processed as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            processed = self.processed,
            succeeded = self.succeeded,
            failed = self.failed,
            batches = self.batches,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Sync run completed"
        );

        if self.failed > 0 {
            tracing::warn!(
                failed = self.failed,
                "Sync run completed with failed records"
            );
        }
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_creation() {
        let run_id = Uuid::new_v4();
        let summary = SyncSummary::new(run_id);

        assert_eq!(summary.run_id, run_id);
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.batches, 0);
        assert_eq!(summary.duration, Duration::ZERO);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = SyncSummary::new(Uuid::new_v4());
        summary.record_success();
        summary.record_success();
        summary.record_failure();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_summary_success_rate() {
        let mut summary = SyncSummary::new(Uuid::new_v4());
        assert_eq!(summary.success_rate(), 100.0);

        summary.record_success();
        summary.record_failure();
        assert_eq!(summary.success_rate(), 50.0);
    }

    #[test]
    fn test_summary_json_shape() {
        let mut summary =
            SyncSummary::new(Uuid::nil()).with_duration(Duration::from_millis(1500));
        summary.record_success();
        summary.batches = 1;

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["processed"], 1);
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["failed"], 0);
        assert_eq!(json["batches"], 1);
        assert_eq!(json["duration_ms"], 1500);
        assert_eq!(json["run_id"], "00000000-0000-0000-0000-000000000000");
    }
}
