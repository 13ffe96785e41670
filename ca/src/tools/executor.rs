//! ToolExecutor - routes the planned action to its card operation

use std::collections::HashMap;
use tracing::{debug, warn};

use super::builtin::{CancelCardTool, ReplaceCardTool, ValidateOwnershipTool};
use super::{CardTool, ToolError};
use crate::domain::{Action, StateUpdate, WorkflowState};

/// Maps each dispatchable action to the tool that performs it
pub struct ToolExecutor {
    tools: HashMap<Action, Box<dyn CardTool>>,
}

impl ToolExecutor {
    /// Create executor with the validate/replace/cancel tools
    pub fn standard() -> Self {
        debug!("ToolExecutor::standard: called");
        let mut executor = Self::empty();
        executor.add_tool(Action::Validate, Box::new(ValidateOwnershipTool));
        executor.add_tool(Action::Replace, Box::new(ReplaceCardTool));
        executor.add_tool(Action::Cancel, Box::new(CancelCardTool));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Register (or replace) the tool for an action
    pub fn add_tool(&mut self, action: Action, tool: Box<dyn CardTool>) {
        debug!(%action, tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(action, tool);
    }

    /// Descriptions of registered tools, sorted by action
    pub fn describe(&self) -> Vec<(Action, &'static str, &'static str)> {
        let mut described: Vec<_> = self
            .tools
            .iter()
            .map(|(action, tool)| (*action, tool.name(), tool.description()))
            .collect();
        described.sort_by_key(|(action, _, _)| action.as_str());
        described
    }

    /// Run the operation selected by `state.next_action()`
    ///
    /// `finish` is a no-op. Destructive actions are refused unless ownership
    /// has been validated, regardless of what the planner produced. Only
    /// destructive actions may set `result`.
    pub async fn dispatch(&self, state: &WorkflowState) -> Result<StateUpdate, ToolError> {
        let action = state.next_action();
        debug!(%action, validated = state.validated(), "ToolExecutor::dispatch: called");

        if action == Action::Finish {
            debug!("ToolExecutor::dispatch: finish, nothing to run");
            return Ok(StateUpdate::default());
        }

        if action.is_destructive() && !state.validated() {
            warn!(%action, "ToolExecutor::dispatch: destructive action without validation");
            return Err(ToolError::UnvalidatedDestructiveAction { action });
        }

        let tool = self.tools.get(&action).ok_or(ToolError::UnknownTool { action })?;
        debug!(tool_name = %tool.name(), "ToolExecutor::dispatch: tool found, executing");
        let mut update = tool.execute(state).await?;

        if !action.is_destructive() && update.result.take().is_some() {
            warn!(tool_name = %tool.name(), "ToolExecutor::dispatch: dropped result from non-destructive tool");
        }

        Ok(update)
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
