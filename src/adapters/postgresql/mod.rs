//! PostgreSQL database integration
//!
//! Stores ERP customers and the sync audit log in PostgreSQL.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLStore;
pub use client::PostgreSQLClient;
pub use models::{ErpCustomerRow, SyncLogRow};
