//! ValidateOwnershipTool - confirms the requester controls the card

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{StateUpdate, WorkflowState};
use crate::tools::{CardTool, ToolError};

/// Stub ownership check; always passes
pub struct ValidateOwnershipTool;

pub const VALIDATION_PASSED: &str = "Mock validation passed.";

#[async_trait]
impl CardTool for ValidateOwnershipTool {
    fn name(&self) -> &'static str {
        "validate_ownership"
    }

    fn description(&self) -> &'static str {
        "Confirm the requester owns the card before any destructive action"
    }

    async fn execute(&self, state: &WorkflowState) -> Result<StateUpdate, ToolError> {
        debug!(already_validated = state.validated(), "ValidateOwnershipTool::execute: called");
        Ok(StateUpdate::validated(VALIDATION_PASSED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_sets_flag_and_reason() {
        let update = ValidateOwnershipTool.execute(&WorkflowState::new("x")).await.unwrap();
        assert_eq!(update.validated, Some(true));
        assert_eq!(update.validation_reason.as_deref(), Some(VALIDATION_PASSED));
        assert!(update.result.is_none());
    }

    #[tokio::test]
    async fn test_validate_twice_is_harmless() {
        let mut state = WorkflowState::new("x");
        for _ in 0..2 {
            let update = ValidateOwnershipTool.execute(&state).await.unwrap();
            state.apply(update);
            assert!(state.validated());
        }
        assert!(state.result().is_none());
    }
}
