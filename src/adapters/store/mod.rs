//! Record store abstraction
//!
//! The sync engine talks to the ERP customer table and the sync log table only
//! through [`RecordStore`], so PostgreSQL and the in-process store are
//! interchangeable.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::create_record_store;
pub use memory::{MemoryStore, TransactionStats};
pub use traits::{RecordStore, StoreTransaction};
