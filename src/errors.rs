//! Error types for resource limit reconciliation

use thiserror::Error;

use crate::state_machine::TransitionError;

/// Errors that can occur while reconciling a resource limit
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A supplied domain, account or project name did not resolve
    #[error("{entity} '{name}' not found")]
    ScopeResolution {
        /// Kind of scope entity ("domain", "account", "project")
        entity: &'static str,
        /// Name as supplied by the caller
        name: String,
    },

    /// A supplied domain, account or project name matched several objects
    #[error("{entity} '{name}' is ambiguous: {count} matches")]
    AmbiguousScope {
        entity: &'static str,
        name: String,
        count: usize,
    },

    /// The platform returned no limit record for the requested scope
    #[error("Resource limit type '{resource_type}' not found for this scope")]
    LimitNotFound {
        /// Symbolic resource type name
        resource_type: String,
    },

    /// Network, HTTP or platform-side failure
    #[error("CloudStack API error: {0}")]
    Transport(String),

    /// Argument combination rejected before any remote call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Response did not have the expected shape
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Pipeline stage reached out of order
    #[error("Invalid reconciliation state: {0}")]
    State(#[from] TransitionError),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

impl ReconcileError {
    /// Shorthand for a scope entity that did not resolve
    pub fn scope(entity: &'static str, name: impl Into<String>) -> Self {
        ReconcileError::ScopeResolution {
            entity,
            name: name.into(),
        }
    }
}

impl From<serde_json::Error> for ReconcileError {
    fn from(err: serde_json::Error) -> Self {
        ReconcileError::Deserialization(err.to_string())
    }
}

impl From<reqwest::Error> for ReconcileError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReconcileError::Transport(format!("request timed out: {}", err))
        } else {
            ReconcileError::Transport(err.to_string())
        }
    }
}
