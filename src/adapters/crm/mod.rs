//! Downstream CRM integration
//!
//! The sync engine pushes each transformed record through [`CrmClient`].
//! [`SimulatedCrm`] stands in for the real CRM and fails a configurable share
//! of calls; [`ScriptedCrm`] replays a fixed outcome sequence for tests.

pub mod scripted;
pub mod simulated;
mod r#trait;

pub use r#trait::CrmClient;
pub use scripted::ScriptedCrm;
pub use simulated::SimulatedCrm;
