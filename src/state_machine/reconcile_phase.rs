// Copyright (c) 2025 - Cowboy AI, Inc.
//! Reconciliation Phase State Machine
//!
//! ```text
//! Start → ScopeResolved → TypeMapped → CurrentStateFetched
//!       → { Unchanged | WouldChange | Changed } → Reported
//! ```
//!
//! `Failed` is reachable from every non-terminal phase. `Reported` and
//! `Failed` are terminal.

use std::fmt;

use super::{StateMachine, StepResult, TransitionError};

/// Stage of a single reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconcilePhase {
    Start,
    ScopeResolved,
    TypeMapped,
    CurrentStateFetched,
    /// Current limit already matches
    Unchanged,
    /// Limit differs but dry-run suppressed the update
    WouldChange,
    /// Update was applied
    Changed,
    Reported,
    Failed,
}

/// Pipeline progress (FSM input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    ScopeResolved,
    TypeMapped,
    StateFetched,
    /// Change detector verdict together with the dry-run flag
    Decided { changed: bool, dry_run: bool },
    /// Update call completed
    Applied,
    Reported,
    Failed,
}

impl ReconcilePhase {
    /// Whether this outcome reports `changed=true`
    pub fn is_change(&self) -> bool {
        matches!(self, Self::WouldChange | Self::Changed)
    }
}

impl fmt::Display for ReconcilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl StateMachine for ReconcilePhase {
    type Event = PhaseEvent;

    fn next(&self, event: &PhaseEvent) -> StepResult<Self> {
        use PhaseEvent as E;
        use ReconcilePhase::*;

        let next = match (self, event) {
            (Reported | Failed, _) => return Err(TransitionError::Terminal(self.to_string())),
            (_, E::Failed) => Failed,

            (Start, E::ScopeResolved) => ScopeResolved,
            (ScopeResolved, E::TypeMapped) => TypeMapped,
            (TypeMapped, E::StateFetched) => CurrentStateFetched,
            (CurrentStateFetched, E::Decided { changed: false, .. }) => Unchanged,
            (CurrentStateFetched, E::Decided { changed: true, dry_run: true }) => WouldChange,
            // The update is in flight; Applied completes it
            (CurrentStateFetched, E::Decided { changed: true, dry_run: false }) => {
                CurrentStateFetched
            }
            (CurrentStateFetched, E::Applied) => Changed,
            (Unchanged | WouldChange | Changed, E::Reported) => Reported,

            (from, event) => {
                return Err(TransitionError::InvalidTransition {
                    from: from.to_string(),
                    event: format!("{:?}", event),
                })
            }
        };
        Ok(next)
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Reported | Self::Failed)
    }
}
