//! Idempotent reconciliation of Apache CloudStack resource limits
//!
//! Reads the current limit for a (resource type, scope) pair, compares it to
//! the desired value and issues an update only when they differ.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;
pub mod state_machine;

// Re-export commonly used types
pub use api::{CloudStackApi, CloudStackClient};
pub use errors::{ReconcileError, ReconcileResult};
pub use service::{LimitRequest, Reconciler, ReconciliationReport};
