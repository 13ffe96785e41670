//! Workflow phases and the transition function

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::{Action, WorkflowState};

/// Named states of the run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Classifying,
    Planning,
    Dispatching,
    Stepping,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classifying => "classifying",
            Self::Planning => "planning",
            Self::Dispatching => "dispatching",
            Self::Stepping => "stepping",
            Self::Finished => "finished",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == Self::Finished
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide the phase that follows `phase`, given the state after `phase` ran
///
/// `Stepping` is evaluated after the step counter has been incremented.
pub fn next_phase(phase: Phase, state: &WorkflowState, max_steps: u32) -> Phase {
    match phase {
        Phase::Classifying => Phase::Planning,
        Phase::Planning => {
            if state.next_action() == Action::Finish {
                Phase::Finished
            } else {
                Phase::Dispatching
            }
        }
        Phase::Dispatching => Phase::Stepping,
        Phase::Stepping => {
            if state.result().is_some() || state.step_count() >= max_steps {
                Phase::Finished
            } else {
                Phase::Planning
            }
        }
        Phase::Finished => Phase::Finished,
    }
}

/// One recorded edge of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Step count when the edge was taken
    pub step_count: u32,
    pub at: DateTime<Utc>,
}

impl Transition {
    pub fn new(from: Phase, to: Phase, step_count: u32) -> Self {
        Self {
            from,
            to,
            step_count,
            at: Utc::now(),
        }
    }
}
