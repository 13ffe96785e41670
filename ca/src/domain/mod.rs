//! Domain types for the card workflow

mod action;
mod state;

pub use action::{Action, Intent};
pub use state::{RunStatus, StateUpdate, WorkflowState};
