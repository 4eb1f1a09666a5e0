// erpsync - ERP to CRM Customer Sync
// Copyright (c) 2025 erpsync Contributors
// Licensed under the MIT License

//! # erpsync - ERP to CRM customer sync
//!
//! erpsync propagates customer records from an ERP table to a CRM. A record is
//! flagged as synced only after the CRM call, an audit log entry and the flag
//! update commit together in one transaction.
//!
//! ## Overview
//!
//! - **Reading** every unsynced customer in insertion order
//! - **Batching** records into fixed-size, order-preserving groups
//! - **Committing** each record with bounded, fixed-delay retries
//! - **Auditing** every terminal outcome as a `SUCCESS` or `FAILED` log entry
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP trigger, log listing and health probe
//! - [`core`] - Sync engine, scheduler and store bootstrap
//! - [`adapters`] - Record stores (PostgreSQL, in-memory) and CRM clients
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use erpsync::adapters::crm::SimulatedCrm;
//! use erpsync::adapters::store::create_record_store;
//! use erpsync::config::load_config;
//! use erpsync::core::sync::SyncEngine;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("erpsync.toml")?;
//!     let store = create_record_store(&config)?;
//!     let crm = Arc::new(SimulatedCrm::from_config(&config.crm));
//!
//!     let engine = SyncEngine::new(store, crm, &config.sync)?;
//!     let summary = engine.run_sync().await?;
//!
//!     println!("Synced {} of {} records", summary.succeeded, summary.processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`] with [`domain::ErpSyncError`].
//! CRM failures never leave the committer; an unavailable record store aborts
//! the current run and is returned to the caller.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
