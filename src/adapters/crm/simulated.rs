//! Simulated CRM with random failures

use crate::adapters::crm::r#trait::CrmClient;
use crate::config::CrmConfig;
use crate::domain::{DownstreamError, SyncPayload};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// CRM stand-in that rejects a share of calls at random
pub struct SimulatedCrm {
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedCrm {
    /// Create a simulated CRM failing with probability `failure_rate`
    ///
    /// The rate is clamped to `0.0..=1.0`.
    pub fn new(failure_rate: f64) -> Self {
        Self::with_rng(failure_rate, StdRng::from_entropy())
    }

    /// Create a simulated CRM with a deterministic random sequence
    pub fn with_seed(failure_rate: f64, seed: u64) -> Self {
        Self::with_rng(failure_rate, StdRng::seed_from_u64(seed))
    }

    /// Create a simulated CRM from configuration
    pub fn from_config(config: &CrmConfig) -> Self {
        Self::new(config.failure_rate)
    }

    fn with_rng(failure_rate: f64, rng: StdRng) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    /// Configured failure probability
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    fn roll_failure(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        rng.gen_bool(self.failure_rate)
    }
}

#[async_trait]
impl CrmClient for SimulatedCrm {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn push(&self, payload: &SyncPayload) -> Result<(), DownstreamError> {
        if self.roll_failure() {
            return Err(DownstreamError::Rejected(
                "Simulated CRM failure".to_string(),
            ));
        }

        tracing::debug!(customer_id = ?payload.customer_id, "Pushed payload to CRM");
        Ok(())
    }
}
