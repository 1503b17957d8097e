// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pipeline State Machines
//!
//! A reconciliation walks a fixed sequence of phases. Each step is a pure
//! `(phase, event) → phase` function; [`Tracker`] applies steps and keeps a
//! log of them so a failure can be reported with the phase it happened in.
//!
//! ```text
//! Tracker::apply(event)
//!     → current.next(&event)      (pure, may reject)
//!     → log Step { from, to, event }
//! ```

pub mod reconcile_phase;

pub use reconcile_phase::{PhaseEvent, ReconcilePhase};

/// Outcome of a single step
pub type StepResult<S> = Result<S, TransitionError>;

/// Rejected step
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Event not accepted in the current phase
    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    /// Current phase accepts no further events
    #[error("{0} is terminal")]
    Terminal(String),
}

/// Phase type with a pure step function
pub trait StateMachine: Sized + Copy {
    /// Event driving the machine forward
    type Event: Clone;

    /// Phase reached from `self` on `event`
    fn next(&self, event: &Self::Event) -> StepResult<Self>;

    fn accepts(&self, event: &Self::Event) -> bool {
        self.next(event).is_ok()
    }

    fn is_terminal(&self) -> bool;
}

/// One applied step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S, E> {
    pub from: S,
    pub to: S,
    pub event: E,
}

/// Current phase plus the log of steps that led to it
#[derive(Debug, Clone)]
pub struct Tracker<S: StateMachine> {
    current: S,
    steps: Vec<Step<S, S::Event>>,
}

impl<S: StateMachine> Tracker<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            steps: Vec::new(),
        }
    }

    /// Advance on `event`; the phase is left untouched when rejected
    pub fn apply(&mut self, event: S::Event) -> StepResult<S> {
        let to = self.current.next(&event)?;
        self.steps.push(Step {
            from: self.current,
            to,
            event,
        });
        self.current = to;
        Ok(to)
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn steps(&self) -> &[Step<S, S::Event>] {
        &self.steps
    }
}
