//! HTTP interface
//!
//! - `POST /sync` - run a sync pass and return its summary
//! - `GET /logs` - list sync log entries, newest first
//! - `GET /health` - record store availability

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{router, serve};
