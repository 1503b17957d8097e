// Copyright (c) 2025 - Cowboy AI, Inc.
//! Limit Reader, Change Detector and Limit Writer
//!
//! ```text
//! read_limit   → listResourceLimits   (always, one round-trip)
//! has_changed  → pure comparison      (no I/O)
//! write_limit  → updateResourceLimit  (only when changed and not dry-run)
//! ```
//!
//! There is no compare-and-swap between the read and the write. If the
//! limit changes remotely in between, the update still goes through.

use tracing::{info, warn};

use crate::api::commands::{ListResourceLimits, ResourceLimitRecord, UpdateResourceLimit};
use crate::api::{self, CloudStackApi};
use crate::domain::{Limit, ResolvedScope, ResourceType};
use crate::errors::{ReconcileError, ReconcileResult};

/// Build the read request for a resolved scope
pub fn list_request(scope: &ResolvedScope, resource_type: ResourceType) -> ListResourceLimits {
    ListResourceLimits {
        account: scope.account.clone(),
        domainid: scope.domain_id.clone(),
        projectid: scope.project_id.clone(),
        resourcetype: resource_type.code(),
    }
}

/// Build the update request carrying the desired limit
pub fn update_request(
    scope: &ResolvedScope,
    resource_type: ResourceType,
    limit: Limit,
) -> UpdateResourceLimit {
    UpdateResourceLimit {
        account: scope.account.clone(),
        domainid: scope.domain_id.clone(),
        projectid: scope.project_id.clone(),
        resourcetype: resource_type.code(),
        max: limit.value(),
    }
}

/// Fetch the current limit record for a scope
///
/// # Errors
/// [`ReconcileError::LimitNotFound`] when CloudStack returns no record.
pub async fn read_limit<A>(
    client: &A,
    scope: &ResolvedScope,
    resource_type: ResourceType,
) -> ReconcileResult<ResourceLimitRecord>
where
    A: CloudStackApi + ?Sized,
{
    let limits = api::query(client, &list_request(scope, resource_type)).await?;

    limits
        .resourcelimit
        .into_iter()
        .next()
        .ok_or_else(|| ReconcileError::LimitNotFound {
            resource_type: resource_type.to_string(),
        })
}

/// Whether applying `desired` would alter `current`
///
/// Only the limit is compared. Scope fields and the resource type are the
/// lookup key, not mutable state.
pub fn has_changed(desired: &UpdateResourceLimit, current: &ResourceLimitRecord) -> bool {
    desired.max != current.max
}

/// Result of the write stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitWrite {
    /// Limit already matched; nothing was sent
    Unchanged(ResourceLimitRecord),
    /// Limit differs, update suppressed by dry-run; carries the prior record
    WouldChange(ResourceLimitRecord),
    /// Update applied; carries the record returned by CloudStack
    Applied(ResourceLimitRecord),
}

impl LimitWrite {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    pub fn record(&self) -> &ResourceLimitRecord {
        match self {
            Self::Unchanged(r) | Self::WouldChange(r) | Self::Applied(r) => r,
        }
    }

    pub fn into_record(self) -> ResourceLimitRecord {
        match self {
            Self::Unchanged(r) | Self::WouldChange(r) | Self::Applied(r) => r,
        }
    }
}

/// Apply `desired` if it differs from `current`
///
/// Errors from the update call propagate as-is; nothing is retried.
pub async fn write_limit<A>(
    client: &A,
    desired: &UpdateResourceLimit,
    current: ResourceLimitRecord,
    dry_run: bool,
) -> ReconcileResult<LimitWrite>
where
    A: CloudStackApi + ?Sized,
{
    if !has_changed(desired, &current) {
        info!("limit already {}, nothing to do", current.max);
        return Ok(LimitWrite::Unchanged(current));
    }

    if dry_run {
        warn!(
            "dry-run: would change limit from {} to {}",
            current.max, desired.max
        );
        return Ok(LimitWrite::WouldChange(current));
    }

    info!("changing limit from {} to {}", current.max, desired.max);
    let updated = api::action(client, desired).await?;
    Ok(LimitWrite::Applied(updated.resourcelimit))
}
