//! State machine for a single form submission.
//!
//! `AwaitingSubmission → Validating → {Persisted, Rejected}`. Terminal states
//! accept no further transitions.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    AwaitingSubmission,
    Validating,
    Persisted,
    Rejected,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Persisted | SubmissionState::Rejected)
    }

    pub fn can_transition_to(&self, to: SubmissionState) -> bool {
        matches!(
            (self, to),
            (SubmissionState::AwaitingSubmission, SubmissionState::Validating)
                | (SubmissionState::Validating, SubmissionState::Persisted)
                | (SubmissionState::Validating, SubmissionState::Rejected)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::AwaitingSubmission => "awaiting_submission",
            SubmissionState::Validating => "validating",
            SubmissionState::Persisted => "persisted",
            SubmissionState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TransitionError {
    InvalidTransition {
        from: SubmissionState,
        to: SubmissionState,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::InvalidTransition { from, to } => {
                write!(f, "Invalid transition from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// Tracks one submission through its states.
#[derive(Debug, Clone)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::AwaitingSubmission,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Move to `to`, or fail without changing state.
    pub fn transition(&mut self, to: SubmissionState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(to) {
            return Err(TransitionError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
