//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, error};

use crate::output::render_text;
use crate::workflow::WorkflowEngine;

/// Interactive session; each submitted line is an independent run
pub struct ReplSession {
    engine: WorkflowEngine,
    debug: bool,
}

impl ReplSession {
    /// The engine's configured step budget applies to every request
    pub fn new(engine: WorkflowEngine) -> Self {
        Self { engine, debug: false }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_request(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Card Service Agent".bright_cyan().bold());
        println!("Describe what you need (e.g. \"please cancel my card ending 4321\").");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let cmd = input.split_whitespace().next().unwrap_or("");
        debug!(%cmd, "ReplSession::handle_slash_command: called");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/debug" | "/d" => {
                self.debug = !self.debug;
                let status = if self.debug { "on" } else { "off" };
                println!("{}", format!("Debug view {}.", status).dimmed());
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the REPL", "/quit".yellow());
        println!("  {:14} Toggle the state/transition view", "/debug".yellow());
        println!();
        println!("{}", "What the agent can do:".bright_cyan());
        for (action, _, description) in self.engine.tool_descriptions() {
            println!("  {:14} {}", action.as_str().yellow(), description);
        }
        println!("Ownership is always validated before a replace or cancel.");
        println!("Up to {} actions per request.", self.engine.max_steps());
        println!();
    }

    /// Run one request; failures are reported and the session continues
    async fn process_request(&self, input: &str) {
        match self.engine.run_default(input).await {
            Ok(outcome) => match render_text(&outcome, self.debug) {
                Ok(text) => print!("{}", text),
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            Err(e) => {
                error!(error = %e, "ReplSession::process_request: run failed");
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        println!();
    }
}

/// Result of handling a slash command
#[derive(Debug, PartialEq, Eq)]
enum SlashResult {
    Continue,
    Quit,
}
