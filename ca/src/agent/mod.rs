//! LLM-facing agents: intent classification, planning, and the safety guard
//!
//! Model output is untrusted. Each agent owns one narrow parser that returns
//! either a validated value or a designated safe fallback.

mod classifier;
mod guard;
mod parse;
mod planner;

pub use classifier::{Classification, IntentClassifier, PARSE_ERROR_REASON, parse_classification};
pub use guard::{GUARD_ANNOTATION, MAX_REASON_CHARS, guard};
pub use planner::{APOLOGY_MESSAGE, PlanDecision, Planner, parse_decision};
