//! WorkflowState - the single record threaded through a run

use serde::Serialize;
use tracing::debug;

use super::{Action, Intent};

/// Accumulated state for one customer submission
///
/// Fields are private: they change only through [`WorkflowState::apply`]
/// (partial updates from the classifier, planner and tools) and the step
/// counter owned by the workflow engine. This keeps `user_input` immutable,
/// `validated` one-way and `step_count` monotonic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowState {
    user_input: String,
    intent: Intent,
    intent_reason: String,
    validated: bool,
    validation_reason: String,
    next_action: Action,
    assistant_message: String,
    plan_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    step_count: u32,
}

impl WorkflowState {
    /// Fresh state for a new submission
    pub fn new(user_input: impl Into<String>) -> Self {
        let user_input = user_input.into();
        debug!(input_len = user_input.len(), "WorkflowState::new: called");
        Self {
            user_input,
            ..Default::default()
        }
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn intent_reason(&self) -> &str {
        &self.intent_reason
    }

    pub fn validated(&self) -> bool {
        self.validated
    }

    pub fn validation_reason(&self) -> &str {
        &self.validation_reason
    }

    pub fn next_action(&self) -> Action {
        self.next_action
    }

    pub fn assistant_message(&self) -> &str {
        &self.assistant_message
    }

    pub fn plan_reason(&self) -> &str {
        &self.plan_reason
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Merge a partial update into this state
    pub fn apply(&mut self, update: StateUpdate) {
        debug!(?update, "WorkflowState::apply: called");
        if let Some(intent) = update.intent {
            self.intent = intent;
        }
        if let Some(reason) = update.intent_reason {
            self.intent_reason = reason;
        }
        // Validation is one-way within a session
        if update.validated == Some(true) {
            self.validated = true;
        }
        if let Some(reason) = update.validation_reason {
            self.validation_reason = reason;
        }
        if let Some(action) = update.next_action {
            self.next_action = action;
        }
        if let Some(message) = update.assistant_message {
            self.assistant_message = message;
        }
        if let Some(reason) = update.plan_reason {
            self.plan_reason = reason;
        }
        if let Some(result) = update.result.filter(|r| !r.trim().is_empty()) {
            self.result = Some(result);
        }
    }

    /// Count one completed dispatch
    pub(crate) fn increment_step(&mut self) {
        self.step_count = self.step_count.saturating_add(1);
        debug!(step_count = self.step_count, "WorkflowState::increment_step: called");
    }

    /// Classify how the run ended, for display
    pub fn outcome(&self) -> RunStatus {
        if self.result.is_some() {
            RunStatus::Completed
        } else if !self.assistant_message.trim().is_empty() {
            RunStatus::Answered
        } else {
            RunStatus::Inconclusive
        }
    }
}

/// Partial update produced by one step and merged into [`WorkflowState`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl StateUpdate {
    /// Update recording a successful ownership check
    pub fn validated(reason: impl Into<String>) -> Self {
        Self {
            validated: Some(true),
            validation_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Update carrying a terminal result
    pub fn result(text: impl Into<String>) -> Self {
        Self {
            result: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// How a finished run should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// A replace/cancel action produced a terminal result
    Completed,
    /// No result, but the planner left a message for the user
    Answered,
    /// Neither a result nor a message
    Inconclusive,
}
