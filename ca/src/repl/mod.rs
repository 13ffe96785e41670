//! Interactive REPL for cardagent
//!
//! Stands in for a text box and a submit button: every line is handled as a
//! fresh request with its own state.

mod session;

pub use session::ReplSession;

use eyre::Result;

use crate::config::Config;
use crate::llm::create_client;
use crate::workflow::WorkflowEngine;

/// Run the interactive REPL
///
/// This is the main entry point for `ca repl`.
pub async fn run_interactive(config: &Config, max_steps: Option<u32>) -> Result<()> {
    config.validate()?;

    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let mut engine = WorkflowEngine::from_config(config, llm);
    if let Some(max_steps) = max_steps {
        engine = engine.with_max_steps(max_steps);
    }

    let mut session = ReplSession::new(engine);
    session.run().await
}
