//! Tool error types

use thiserror::Error;

use crate::domain::Action;

/// Errors that can occur while dispatching a card operation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Refusing to {action}: card ownership has not been validated")]
    UnvalidatedDestructiveAction { action: Action },

    #[error("No tool registered for action: {action}")]
    UnknownTool { action: Action },

    #[error("Tool {tool} failed: {message}")]
    Failed { tool: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvalidated_message() {
        let err = ToolError::UnvalidatedDestructiveAction { action: Action::Cancel };
        let msg = err.to_string();
        assert!(msg.contains("cancel"));
        assert!(msg.contains("not been validated"));
    }

    #[test]
    fn test_failed_message() {
        let err = ToolError::Failed {
            tool: "replace_card".to_string(),
            message: "issuer unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Tool replace_card failed: issuer unavailable");
    }
}
