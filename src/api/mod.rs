// Copyright (c) 2025 - Cowboy AI, Inc.
//! CloudStack API Abstraction
//!
//! The reconciliation core never talks HTTP directly. It is handed a
//! [`CloudStackApi`] implementation exposing two capabilities:
//!
//! ```text
//! query(command, params)  → read-only call  (list*)
//! action(command, params) → mutating call   (update*)
//! ```
//!
//! Requests are built from one typed struct per remote command
//! (see [`commands`]). Each implements [`ApiCommand`], which names the
//! command, declares its response type and flattens the struct into the
//! flat string parameter map CloudStack expects. `None` fields are omitted
//! rather than sent empty.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudstack_resource_limit::api::{self, commands::ListDomains, CloudStackClient};
//! use cloudstack_resource_limit::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("https://cloud.example.com/client/api", "key", "secret");
//!     let client = CloudStackClient::new(config)?;
//!
//!     let domains = api::query(&client, &ListDomains { listall: true }).await?;
//!     println!("{} domains", domains.domain.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod commands;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::errors::{ReconcileError, ReconcileResult};

pub use client::{sign_request, CloudStackClient};

/// Flat request parameters, ordered by key
pub type ApiParams = BTreeMap<String, String>;

/// Remote control plane capabilities consumed by the reconciler
#[async_trait]
pub trait CloudStackApi: Send + Sync {
    /// Issue a read-only command and return its unwrapped response payload
    async fn query(&self, command: &str, params: ApiParams) -> ReconcileResult<Value>;

    /// Issue a mutating command and return its unwrapped response payload
    async fn action(&self, command: &str, params: ApiParams) -> ReconcileResult<Value>;
}

/// Typed request for a single CloudStack command
pub trait ApiCommand: Serialize + Sync {
    /// CloudStack command name, e.g. `listResourceLimits`
    const NAME: &'static str;

    /// Shape of the unwrapped response payload
    type Response: DeserializeOwned;

    /// Flatten into request parameters, skipping absent fields
    fn params(&self) -> ReconcileResult<ApiParams> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::Null => None,
                    Value::String(s) => Some((key, s)),
                    other => Some((key, other.to_string())),
                })
                .collect()),
            other => Err(ReconcileError::Deserialization(format!(
                "{} parameters must serialize to an object, got {}",
                Self::NAME,
                other
            ))),
        }
    }
}

/// Run a read-only command and decode its response
pub async fn query<A, C>(client: &A, command: &C) -> ReconcileResult<C::Response>
where
    A: CloudStackApi + ?Sized,
    C: ApiCommand,
{
    let params = command.params()?;
    debug!("query {} {:?}", C::NAME, params);
    let payload = client.query(C::NAME, params).await?;
    decode::<C>(payload)
}

/// Run a mutating command and decode its response
pub async fn action<A, C>(client: &A, command: &C) -> ReconcileResult<C::Response>
where
    A: CloudStackApi + ?Sized,
    C: ApiCommand,
{
    let params = command.params()?;
    debug!("action {} {:?}", C::NAME, params);
    let payload = client.action(C::NAME, params).await?;
    decode::<C>(payload)
}

fn decode<C: ApiCommand>(payload: Value) -> ReconcileResult<C::Response> {
    serde_json::from_value(payload).map_err(|e| {
        ReconcileError::Deserialization(format!("unexpected {} response: {}", C::NAME, e))
    })
}
