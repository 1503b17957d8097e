// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Limit Reconciler
//!
//! Drives one reconciliation through the phase state machine:
//!
//! ```text
//! resolve_scope → ResourceType::code → read_limit → has_changed → write_limit → report
//! ```
//!
//! Every stage awaits its round-trip before the next starts. Any error moves
//! the machine to `Failed` and is returned unchanged to the caller.

use tracing::{debug, error, info};

use super::limits::{read_limit, update_request, write_limit, LimitWrite};
use super::report::ReconciliationReport;
use super::scope_resolver::resolve_scope;
use crate::api::CloudStackApi;
use crate::domain::{Limit, ResourceType, ScopeSpec};
use crate::errors::ReconcileResult;
use crate::state_machine::{PhaseEvent, ReconcilePhase, StateMachine, Tracker};

/// Desired state for one resource limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitRequest {
    pub resource_type: ResourceType,
    pub limit: Limit,
    pub scope: ScopeSpec,
    pub dry_run: bool,
}

impl LimitRequest {
    pub fn new(resource_type: ResourceType, limit: Limit, scope: ScopeSpec) -> Self {
        Self {
            resource_type,
            limit,
            scope,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

type PhaseTracker = Tracker<ReconcilePhase>;

/// Reconciles resource limits through an injected API client
pub struct Reconciler<'a, A: CloudStackApi + ?Sized> {
    client: &'a A,
}

impl<'a, A: CloudStackApi + ?Sized> Reconciler<'a, A> {
    pub fn new(client: &'a A) -> Self {
        Self { client }
    }

    /// Bring the remote limit in line with `request`
    pub async fn reconcile(&self, request: &LimitRequest) -> ReconcileResult<ReconciliationReport> {
        let mut phases = PhaseTracker::new(ReconcilePhase::Start);

        match self.run(request, &mut phases).await {
            Ok(report) => {
                debug!(
                    "reconciliation finished after {} transitions",
                    phases.steps().len()
                );
                Ok(report)
            }
            Err(e) => {
                let at = phases.current();
                if let Err(te) = advance(&mut phases, PhaseEvent::Failed) {
                    debug!("could not record failure: {}", te);
                }
                error!("reconciliation of {} failed at {}: {}", request.resource_type, at, e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        request: &LimitRequest,
        phases: &mut PhaseTracker,
    ) -> ReconcileResult<ReconciliationReport> {
        let scope = resolve_scope(self.client, &request.scope).await?;
        advance(phases, PhaseEvent::ScopeResolved)?;

        let desired = update_request(&scope, request.resource_type, request.limit);
        advance(phases, PhaseEvent::TypeMapped)?;

        let current = read_limit(self.client, &scope, request.resource_type).await?;
        advance(phases, PhaseEvent::StateFetched)?;

        let write = write_limit(self.client, &desired, current, request.dry_run).await?;
        advance(
            phases,
            PhaseEvent::Decided {
                changed: write.changed(),
                dry_run: request.dry_run,
            },
        )?;
        if let LimitWrite::Applied(_) = write {
            advance(phases, PhaseEvent::Applied)?;
        }

        let outcome = phases.current();
        info!(
            "{} limit is {} ({})",
            request.resource_type,
            write.record().max,
            outcome
        );

        let report =
            ReconciliationReport::project(write.into_record(), request.resource_type, outcome.is_change());
        advance(phases, PhaseEvent::Reported)?;
        Ok(report)
    }
}

fn advance(phases: &mut PhaseTracker, event: PhaseEvent) -> ReconcileResult<()> {
    let from = phases.current();
    let to = phases.apply(event)?;
    debug!("phase {} → {}", from, to);
    if to.is_terminal() {
        debug!("reached terminal phase {}", to);
    }
    Ok(())
}
