//! CancelCardTool - deactivates the card

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{StateUpdate, WorkflowState};
use crate::tools::{CardTool, ToolError};

pub const CANCELLATION_COMPLETED: &str = "Cancellation completed. Your card is now inactive.";

/// Stub cancellation; returns a canned confirmation
pub struct CancelCardTool;

#[async_trait]
impl CardTool for CancelCardTool {
    fn name(&self) -> &'static str {
        "cancel_card"
    }

    fn description(&self) -> &'static str {
        "Cancel the customer's card"
    }

    async fn execute(&self, state: &WorkflowState) -> Result<StateUpdate, ToolError> {
        debug!(validated = state.validated(), "CancelCardTool::execute: called");
        info!("Cancellation issued");
        Ok(StateUpdate::result(CANCELLATION_COMPLETED))
    }
}
