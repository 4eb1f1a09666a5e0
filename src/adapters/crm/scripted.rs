//! CRM double that replays scripted outcomes

use crate::adapters::crm::r#trait::CrmClient;
use crate::domain::{DownstreamError, SyncPayload};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Script {
    outcomes: VecDeque<bool>,
    fallback: bool,
    pushed: Vec<SyncPayload>,
    calls: usize,
}

/// CRM whose push results follow a fixed script
///
/// Each call consumes the next scripted outcome (`true` = success). Once the
/// script is empty, calls return the fallback outcome.
#[derive(Debug, Default)]
pub struct ScriptedCrm {
    script: Mutex<Script>,
}

impl ScriptedCrm {
    /// Every push succeeds
    pub fn always_succeed() -> Self {
        Self::from_outcomes([], true)
    }

    /// Every push fails
    pub fn always_fail() -> Self {
        Self::from_outcomes([], false)
    }

    /// Replay `outcomes`, then return `fallback`
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            script: Mutex::new(Script {
                outcomes: outcomes.into_iter().collect(),
                fallback,
                ..Script::default()
            }),
        }
    }

    /// Number of push calls so far
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Payloads pushed so far, including rejected ones
    pub fn pushed(&self) -> Vec<SyncPayload> {
        self.lock().pushed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[async_trait]
impl CrmClient for ScriptedCrm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn push(&self, payload: &SyncPayload) -> Result<(), DownstreamError> {
        let mut script = self.lock();
        script.calls += 1;
        script.pushed.push(payload.clone());

        let fallback = script.fallback;
        if script.outcomes.pop_front().unwrap_or(fallback) {
            Ok(())
        } else {
            Err(DownstreamError::Rejected(format!(
                "scripted failure on call {}",
                script.calls
            )))
        }
    }
}
