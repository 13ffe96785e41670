//! Workflow error types

use thiserror::Error;

use crate::llm::LlmError;
use crate::tools::ToolError;

/// Errors that end a run without a final state
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Language model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Card operation failed: {0}")]
    Tool(#[from] ToolError),

    #[error("Failed to render prompt: {0}")]
    Prompt(String),

    #[error("max_steps must be at least 1")]
    InvalidStepBudget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Action;

    #[test]
    fn test_from_llm_error() {
        let err: WorkflowError = LlmError::InvalidResponse("empty".to_string()).into();
        assert!(matches!(err, WorkflowError::Llm(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_from_tool_error() {
        let err: WorkflowError = ToolError::UnknownTool { action: Action::Replace }.into();
        assert!(matches!(err, WorkflowError::Tool(_)));
        assert!(err.to_string().starts_with("Card operation failed"));
    }
}
