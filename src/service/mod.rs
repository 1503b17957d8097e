// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Resource Limit Reconciliation
//!
//! # Architecture
//!
//! ```text
//! LimitRequest
//!     ↓
//! Scope Resolver      (listDomains / listAccounts / listProjects)
//!     ↓
//! Resource Type Mapper (ResourceType::code)
//!     ↓
//! Limit Reader        (listResourceLimits)
//!     ↓
//! Change Detector     (pure)
//!     ↓
//! Limit Writer        (updateResourceLimit, skipped when unchanged or dry-run)
//!     ↓
//! Result Projector    → ReconciliationReport
//! ```
//!
//! Every component takes the API client by reference; nothing holds a
//! global session.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudstack_resource_limit::config::ApiConfig;
//! use cloudstack_resource_limit::domain::{Limit, ResourceType, ScopeSpec};
//! use cloudstack_resource_limit::service::{LimitRequest, Reconciler};
//! use cloudstack_resource_limit::CloudStackClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudStackClient::new(ApiConfig::new("https://cloud/client/api", "k", "s"))?;
//!     let scope = ScopeSpec::new(Some("customers".into()), None, None)?;
//!     let request = LimitRequest::new(ResourceType::Instance, Limit::new(10)?, scope);
//!
//!     let report = Reconciler::new(&client).reconcile(&request).await?;
//!     println!("changed: {}", report.changed);
//!     Ok(())
//! }
//! ```

pub mod limits;
pub mod reconciler;
pub mod report;
pub mod scope_resolver;

pub use limits::{has_changed, read_limit, write_limit, LimitWrite};
pub use reconciler::{LimitRequest, Reconciler};
pub use report::ReconciliationReport;
pub use scope_resolver::resolve_scope;
