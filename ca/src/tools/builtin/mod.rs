//! Built-in card operations
//!
//! These are stand-ins for the ownership, issuance and cancellation
//! services; each returns a canned confirmation.

mod cancel;
mod replace;
mod validate;

pub use cancel::{CANCELLATION_COMPLETED, CancelCardTool};
pub use replace::{REPLACEMENT_COMPLETED, ReplaceCardTool};
pub use validate::{VALIDATION_PASSED, ValidateOwnershipTool};
