//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Template name for intent classification
pub const CLASSIFY_NAME: &str = "classify";

/// Template name for next-action planning
pub const PLAN_NAME: &str = "plan";

/// Intent classification prompt
pub const CLASSIFY: &str = include_str!("../../prompts/classify.pmt");

/// Planner prompt
pub const PLAN: &str = include_str!("../../prompts/plan.pmt");

/// Names of all embedded templates
pub const NAMES: [&str; 2] = [CLASSIFY_NAME, PLAN_NAME];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        CLASSIFY_NAME => Some(CLASSIFY),
        PLAN_NAME => Some(PLAN),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
