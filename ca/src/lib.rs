//! cardagent - Autonomous Card-Service Agent
//!
//! Takes a free-text customer request about a payment card, works out
//! whether the customer wants it replaced or cancelled, and carries the
//! request through to completion without asking a human for confirmation.
//!
//! # Core Concepts
//!
//! - **One state per request**: a [`WorkflowState`] accumulates partial
//!   updates from each step and is the run's only output
//! - **Untrusted planner**: the model proposes the next action; the
//!   [`agent::guard`] rewrites any replace/cancel to `validate` until
//!   ownership has been confirmed
//! - **Bounded loop**: at most `max_steps` dispatch cycles per request
//! - **Safe fallbacks**: unparseable model output degrades to `unknown`
//!   intent or a `finish` decision with an apology
//!
//! # Modules
//!
//! - [`agent`] - Intent classifier, planner and guard
//! - [`workflow`] - Phase machine and run engine
//! - [`tools`] - Card operations and their dispatcher
//! - [`llm`] - Language-model gateway trait and providers
//! - [`prompts`] - Handlebars prompt templates
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod output;
pub mod prompts;
pub mod repl;
pub mod tools;
pub mod workflow;

// Re-export commonly used types
pub use agent::{Classification, IntentClassifier, PlanDecision, Planner, guard};
pub use config::{Config, LlmConfig, WorkflowConfig};
pub use domain::{Action, Intent, RunStatus, StateUpdate, WorkflowState};
pub use llm::{AnthropicClient, GenerateRequest, GenerateResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use tools::{CardTool, ToolError, ToolExecutor};
pub use workflow::{Phase, RunOutcome, Transition, WorkflowEngine, WorkflowError, next_phase};
