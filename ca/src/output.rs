//! Rendering run outcomes for the terminal

use colored::Colorize;
use eyre::{Context, Result};

use crate::domain::RunStatus;
use crate::workflow::RunOutcome;

/// Human-readable summary of a finished run
///
/// With `debug`, the final state (pretty JSON) and the phase path follow the
/// summary.
pub fn render_text(outcome: &RunOutcome, debug: bool) -> Result<String> {
    let state = &outcome.state;
    let mut out = String::new();

    if !state.assistant_message().is_empty() {
        out.push_str(&format!("{} {}\n", "Agent:".bright_blue(), state.assistant_message()));
    }

    match state.outcome() {
        RunStatus::Completed => {
            let result = state.result().unwrap_or_default();
            out.push_str(&format!("{} {}\n", "Result:".bright_green(), result));
        }
        RunStatus::Answered => {}
        RunStatus::Inconclusive => {
            out.push_str(&format!(
                "{}\n",
                "No action taken and nothing to report (inconclusive run).".yellow()
            ));
        }
    }

    if debug {
        let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;
        out.push('\n');
        out.push_str(&format!("{}\n", "State:".bright_cyan()));
        out.push_str(&json);
        out.push('\n');
        out.push_str(&format!("{}\n", "Transitions:".bright_cyan()));
        for t in &outcome.transitions {
            out.push_str(&format!("  {} -> {} (steps: {})\n", t.from, t.to, t.step_count));
        }
        out.push_str(&format!("{} {}\n", "Run:".dimmed(), outcome.run_id.to_string().dimmed()));
    }

    Ok(out)
}

/// Whole outcome as pretty JSON
pub fn render_json(outcome: &RunOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("Failed to serialize run outcome")
}
