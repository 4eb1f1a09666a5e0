//! CRM client trait

use crate::domain::{DownstreamError, SyncPayload};
use async_trait::async_trait;

/// Receiver of synced customer payloads
///
/// A push either succeeds or fails; every failure is treated as transient and
/// retried by the committer.
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Short client name for logs
    fn name(&self) -> &'static str;

    /// Deliver one payload
    ///
    /// # Errors
    ///
    /// Returns a [`DownstreamError`] if the CRM did not accept the payload.
    async fn push(&self, payload: &SyncPayload) -> Result<(), DownstreamError>;
}
