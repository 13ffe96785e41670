//! CardTool trait definition

use async_trait::async_trait;

use super::ToolError;
use crate::domain::{StateUpdate, WorkflowState};

/// A side-effecting card operation the workflow can dispatch
///
/// Tools read the state but never mutate it or decide control flow; they
/// return a partial update for the engine to merge.
#[async_trait]
pub trait CardTool: Send + Sync {
    /// Tool name (for logs)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Execute the operation against the current state
    async fn execute(&self, state: &WorkflowState) -> Result<StateUpdate, ToolError>;
}
