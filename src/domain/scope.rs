// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tenant Scope Value Objects
//!
//! A scope is the (domain, account, project) triple a resource limit applies
//! to. Callers supply human readable names ([`ScopeSpec`]); the resolver turns
//! them into the identifiers CloudStack addresses limits by ([`ResolvedScope`]).
//! Domains and projects resolve to opaque ids, accounts stay names.

use crate::errors::{ReconcileError, ReconcileResult};

/// Scope as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSpec {
    pub domain: Option<String>,
    pub account: Option<String>,
    pub project: Option<String>,
}

impl ScopeSpec {
    /// Build a scope, rejecting an account without its domain
    pub fn new(
        domain: Option<String>,
        account: Option<String>,
        project: Option<String>,
    ) -> ReconcileResult<Self> {
        let spec = Self {
            domain: non_empty(domain),
            account: non_empty(account),
            project: non_empty(project),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check field combinations
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.account.is_some() && self.domain.is_none() {
            return Err(ReconcileError::InvalidArgument(
                "account must be specified with domain".to_string(),
            ));
        }
        Ok(())
    }

    /// No scope fields set: the global/default scope
    pub fn is_global(&self) -> bool {
        self.domain.is_none() && self.account.is_none() && self.project.is_none()
    }
}

/// Scope expressed in CloudStack's own addressing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScope {
    pub domain_id: Option<String>,
    pub account: Option<String>,
    pub project_id: Option<String>,
}

/// Canonical CloudStack path for a user supplied domain
///
/// `customers`, `/customers/` and `ROOT/customers` all become
/// `ROOT/customers`; `ROOT` stays the root domain.
pub fn domain_path(domain: &str) -> String {
    let trimmed = domain.trim_matches('/');
    let lower = trimmed.to_lowercase();
    if lower == "root" || lower.starts_with("root/") {
        trimmed.to_string()
    } else {
        format!("ROOT/{}", trimmed)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
