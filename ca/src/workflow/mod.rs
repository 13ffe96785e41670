//! The run loop
//!
//! A request moves through explicit phases:
//!
//! ```text
//! Classifying -> Planning -> Dispatching -> Stepping -> Planning -> ... -> Finished
//!                   |                          |
//!                   +--(finish)--> Finished <--+--(result or budget spent)
//! ```

mod engine;
mod error;
mod phase;

pub use engine::{RunOutcome, WorkflowEngine};
pub use error::WorkflowError;
pub use phase::{Phase, Transition, next_phase};
