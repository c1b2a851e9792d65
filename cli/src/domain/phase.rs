//! Lifecycle phases of a verification run.
//!
//! `Idle → Provisioning → Verifying → Destroying → Done`, with `Destroying`
//! reachable from every phase before it.

use std::fmt;

use serde::Serialize;

use crate::domain::error::PhaseError;

/// A single lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Provisioning,
    Verifying,
    Destroying,
    Done,
}

impl Phase {
    /// Returns `true` if moving from `self` to `next` is a legal transition.
    #[must_use]
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Provisioning)
                | (Phase::Provisioning, Phase::Verifying)
                | (Phase::Destroying, Phase::Done)
        ) || (next == Phase::Destroying && self.precedes_teardown())
    }

    fn precedes_teardown(self) -> bool {
        matches!(self, Phase::Idle | Phase::Provisioning | Phase::Verifying)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Provisioning => "provisioning",
            Phase::Verifying => "verifying",
            Phase::Destroying => "destroying",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

/// Tracks the current phase and every phase visited so far.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    current: Phase,
    history: Vec<Phase>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            current: Phase::Idle,
            history: vec![Phase::Idle],
        }
    }
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Phase {
        self.current
    }

    #[must_use]
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError`] if the transition is not allowed.
    pub fn advance(&mut self, next: Phase) -> Result<(), PhaseError> {
        if !self.current.can_advance_to(next) {
            return Err(PhaseError {
                from: self.current,
                to: next,
            });
        }
        self.current = next;
        self.history.push(next);
        Ok(())
    }

    #[must_use]
    pub fn into_history(self) -> Vec<Phase> {
        self.history
    }
}
