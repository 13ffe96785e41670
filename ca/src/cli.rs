//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// cardagent - autonomous card-service agent
#[derive(Parser)]
#[command(
    name = "ca",
    about = "Autonomous card-service agent: classify, plan, guard, act",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to the interactive prompt)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a single request and print the outcome
    Run {
        /// The customer's request, e.g. "please cancel my card ending 4321"
        request: String,

        /// Maximum dispatch cycles (overrides workflow.max-steps)
        #[arg(short, long)]
        max_steps: Option<u32>,

        /// Model to use (overrides llm.model)
        #[arg(long)]
        model: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show the final state and phase transitions
        #[arg(short, long)]
        debug: bool,
    },

    /// Interactive prompt; every line is a separate request
    Repl {
        /// Maximum dispatch cycles (overrides workflow.max-steps)
        #[arg(short, long)]
        max_steps: Option<u32>,
    },

    /// Print the effective configuration as YAML
    Config,

    /// Render a prompt template as the agent would send it
    Prompt {
        /// Template name (classify, plan)
        #[arg(value_name = "NAME")]
        name: String,

        /// User message to embed
        #[arg(short, long, default_value = "")]
        input: String,

        /// Render the plan prompt as if ownership were validated
        #[arg(long)]
        validated: bool,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardagent")
        .join("logs")
        .join("cardagent.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Text appended to `--help`
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}\n", get_log_path().display())
}

/// Output format for `run`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
