// Copyright (c) 2025 - Cowboy AI, Inc.
//! Result Projector
//!
//! Shapes the final limit record into the externally reported outcome. This
//! is the only place the numeric resource type code is traded back for its
//! symbolic name.

use serde::{Deserialize, Serialize};

use crate::api::commands::ResourceLimitRecord;
use crate::domain::ResourceType;

/// Outcome of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub resource_type: ResourceType,
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub changed: bool,
}

impl ReconciliationReport {
    /// Project a record into a report
    pub fn project(record: ResourceLimitRecord, resource_type: ResourceType, changed: bool) -> Self {
        Self {
            resource_type,
            limit: record.max,
            domain: record.domain,
            account: record.account,
            project: record.project,
            changed,
        }
    }
}
