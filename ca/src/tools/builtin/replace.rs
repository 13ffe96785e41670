//! ReplaceCardTool - issues a replacement card

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{StateUpdate, WorkflowState};
use crate::tools::{CardTool, ToolError};

pub const REPLACEMENT_COMPLETED: &str = "Replacement completed. A new card will arrive in 5-7 business days.";

/// Stub replacement; returns a canned confirmation
pub struct ReplaceCardTool;

#[async_trait]
impl CardTool for ReplaceCardTool {
    fn name(&self) -> &'static str {
        "replace_card"
    }

    fn description(&self) -> &'static str {
        "Order a replacement for the customer's card"
    }

    async fn execute(&self, state: &WorkflowState) -> Result<StateUpdate, ToolError> {
        debug!(validated = state.validated(), "ReplaceCardTool::execute: called");
        info!("Replacement issued");
        Ok(StateUpdate::result(REPLACEMENT_COMPLETED))
    }
}
