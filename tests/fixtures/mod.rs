// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cloudstack-resource-limit
//!
//! Provides an in-memory CloudStack ([`FakeCloud`]) implementing
//! `CloudStackApi`, with deterministic ids and a log of every command issued.
//!
//! # Design Principles
//! - All ids are fixed constants
//! - Limits are stored as raw JSON so tests can seed string, integer and
//!   nested representations
//! - Every call is recorded so tests can assert which round-trips happened

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

use cloudstack_resource_limit::api::{ApiParams, CloudStackApi};
use cloudstack_resource_limit::{ReconcileError, ReconcileResult};

pub const ROOT_DOMAIN_ID: &str = "9a1c0000-0000-4000-8000-000000000001";
pub const CUSTOMERS_DOMAIN_ID: &str = "9a1c0000-0000-4000-8000-000000000002";
pub const OTHER_DOMAIN_ID: &str = "9a1c0000-0000-4000-8000-000000000003";
pub const MOSERRE_ACCOUNT_ID: &str = "9a1c0000-0000-4000-8000-0000000000a1";
pub const PROJ1_PROJECT_ID: &str = "9a1c0000-0000-4000-8000-0000000000f1";
pub const OTHER_PROJ1_PROJECT_ID: &str = "9a1c0000-0000-4000-8000-0000000000f2";

/// Identity of one stored limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitKey {
    pub account: Option<String>,
    pub domainid: Option<String>,
    pub projectid: Option<String>,
    pub resourcetype: u8,
}

impl LimitKey {
    pub fn domain(domainid: &str, resourcetype: u8) -> Self {
        Self {
            account: None,
            domainid: Some(domainid.to_string()),
            projectid: None,
            resourcetype,
        }
    }

    pub fn account(account: &str, domainid: &str, resourcetype: u8) -> Self {
        Self {
            account: Some(account.to_string()),
            ..Self::domain(domainid, resourcetype)
        }
    }

    pub fn project(projectid: &str, resourcetype: u8) -> Self {
        Self {
            account: None,
            domainid: None,
            projectid: Some(projectid.to_string()),
            resourcetype,
        }
    }

    fn from_params(params: &ApiParams) -> Option<Self> {
        Some(Self {
            account: params.get("account").cloned(),
            domainid: params.get("domainid").cloned(),
            projectid: params.get("projectid").cloned(),
            resourcetype: params.get("resourcetype")?.parse().ok()?,
        })
    }
}

#[derive(Debug, Default)]
struct CloudState {
    domains: Vec<Value>,
    accounts: Vec<Value>,
    projects: Vec<Value>,
    limits: Vec<(LimitKey, Value)>,
    calls: Vec<(String, ApiParams)>,
    fail_updates: Option<String>,
}

/// In-memory CloudStack
#[derive(Debug, Default)]
pub struct FakeCloud {
    state: Mutex<CloudState>,
}

impl FakeCloud {
    /// ROOT and ROOT/customers, account moserre in customers, project proj1
    pub fn seeded() -> Self {
        Self::default()
            .with_domain(ROOT_DOMAIN_ID, "ROOT", "ROOT")
            .with_domain(CUSTOMERS_DOMAIN_ID, "customers", "ROOT/customers")
            .with_account(MOSERRE_ACCOUNT_ID, "moserre", CUSTOMERS_DOMAIN_ID)
            .with_project(PROJ1_PROJECT_ID, "proj1", CUSTOMERS_DOMAIN_ID)
    }

    /// Adds ROOT/other holding a second project named proj1
    pub fn with_duplicate_project(self) -> Self {
        self.with_domain(OTHER_DOMAIN_ID, "other", "ROOT/other")
            .with_project(OTHER_PROJ1_PROJECT_ID, "proj1", OTHER_DOMAIN_ID)
    }

    pub fn with_domain(self, id: &str, name: &str, path: &str) -> Self {
        self.state.lock().unwrap().domains.push(json!({
            "id": id, "name": name, "path": path
        }));
        self
    }

    pub fn with_account(self, id: &str, name: &str, domainid: &str) -> Self {
        self.state.lock().unwrap().accounts.push(json!({
            "id": id, "name": name, "domainid": domainid
        }));
        self
    }

    pub fn with_project(self, id: &str, name: &str, domainid: &str) -> Self {
        self.state.lock().unwrap().projects.push(json!({
            "id": id, "name": name, "domainid": domainid
        }));
        self
    }

    /// Seed a limit; `max` is stored verbatim
    pub fn with_limit(self, key: LimitKey, max: Value) -> Self {
        self.state.lock().unwrap().limits.push((key, max));
        self
    }

    /// Make every update call fail with a platform error
    pub fn failing_updates(self, errortext: &str) -> Self {
        self.state.lock().unwrap().fail_updates = Some(errortext.to_string());
        self
    }

    /// Command names issued so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    /// Parameters of the n-th call to `command`
    pub fn params_of(&self, command: &str, n: usize) -> Option<ApiParams> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|(c, _)| c == command)
            .nth(n)
            .map(|(_, params)| params.clone())
    }

    pub fn count(&self, command: &str) -> usize {
        self.commands().iter().filter(|c| c.as_str() == command).count()
    }

    pub fn stored_limit(&self, key: &LimitKey) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .limits
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, max)| max.clone())
    }

    fn record(state: &CloudState, key: &LimitKey, max: &Value) -> Value {
        let domain = key.domainid.as_ref().and_then(|id| {
            state
                .domains
                .iter()
                .find(|d| d["id"] == id.as_str())
                .map(|d| d["name"].clone())
        });
        let project = key.projectid.as_ref().and_then(|id| {
            state
                .projects
                .iter()
                .find(|p| p["id"] == id.as_str())
                .map(|p| p["name"].clone())
        });

        let mut record = json!({
            "resourcetype": key.resourcetype.to_string(),
            "max": max,
        });
        let fields = [
            ("account", key.account.clone().map(Value::from)),
            ("domainid", key.domainid.clone().map(Value::from)),
            ("domain", domain),
            ("projectid", key.projectid.clone().map(Value::from)),
            ("project", project),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                record[name] = value;
            }
        }
        record
    }
}

#[async_trait]
impl CloudStackApi for FakeCloud {
    async fn query(&self, command: &str, params: ApiParams) -> ReconcileResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((command.to_string(), params.clone()));

        match command {
            "listDomains" => Ok(json!({
                "count": state.domains.len(),
                "domain": state.domains,
            })),
            "listAccounts" => {
                let accounts: Vec<Value> = state
                    .accounts
                    .iter()
                    .filter(|a| {
                        params.get("name").map_or(true, |n| {
                            a["name"].as_str().is_some_and(|name| name.eq_ignore_ascii_case(n))
                        })
                    })
                    .filter(|a| {
                        params
                            .get("domainid")
                            .map_or(true, |d| a["domainid"] == d.as_str())
                    })
                    .cloned()
                    .collect();
                if accounts.is_empty() {
                    Ok(json!({}))
                } else {
                    Ok(json!({"count": accounts.len(), "account": accounts}))
                }
            }
            "listProjects" => {
                let projects: Vec<Value> = state
                    .projects
                    .iter()
                    .filter(|p| {
                        params
                            .get("domainid")
                            .map_or(true, |d| p["domainid"] == d.as_str())
                    })
                    .cloned()
                    .collect();
                Ok(json!({"count": projects.len(), "project": projects}))
            }
            "listResourceLimits" => {
                let key = LimitKey::from_params(&params).ok_or_else(|| {
                    ReconcileError::Transport("listResourceLimits needs resourcetype".into())
                })?;
                match state.limits.iter().find(|(k, _)| *k == key) {
                    Some((k, max)) => Ok(json!({
                        "count": 1,
                        "resourcelimit": [Self::record(&state, k, max)],
                    })),
                    None => Ok(json!({})),
                }
            }
            other => Err(ReconcileError::Transport(format!("unknown query {}", other))),
        }
    }

    async fn action(&self, command: &str, params: ApiParams) -> ReconcileResult<Value> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((command.to_string(), params.clone()));

        if command != "updateResourceLimit" {
            return Err(ReconcileError::Transport(format!("unknown action {}", command)));
        }
        if let Some(text) = &state.fail_updates {
            return Err(ReconcileError::Transport(format!(
                "updateResourceLimit failed (530): {}",
                text
            )));
        }

        let key = LimitKey::from_params(&params)
            .ok_or_else(|| ReconcileError::Transport("updateResourceLimit needs resourcetype".into()))?;
        let max: i64 = params
            .get("max")
            .and_then(|m| m.parse().ok())
            .ok_or_else(|| ReconcileError::Transport("updateResourceLimit needs max".into()))?;

        match state.limits.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = json!(max),
            None => state.limits.push((key.clone(), json!(max))),
        }

        Ok(json!({ "resourcelimit": Self::record(&state, &key, &json!(max)) }))
    }
}
