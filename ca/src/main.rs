//! cardagent - autonomous card-service agent
//!
//! CLI entry point: one-shot runs, the interactive prompt, and helpers for
//! inspecting configuration and prompt templates.

use std::fs;

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use cardagent::cli::{Cli, Command, OutputFormat, generate_after_help, get_log_path};
use cardagent::config::Config;
use cardagent::llm::create_client;
use cardagent::output::{render_json, render_text};
use cardagent::prompts::{PromptLoader, embedded};
use cardagent::repl;
use cardagent::workflow::WorkflowEngine;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        None => tracing::Level::INFO,
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, model = %config.llm.model, "cardagent loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Run {
            request,
            max_steps,
            model,
            format,
            debug: show_debug,
        }) => cmd_run(config, &request, max_steps, model, format, show_debug).await,
        Some(Command::Repl { max_steps }) => repl::run_interactive(&config, max_steps).await,
        Some(Command::Config) => cmd_config(&config),
        Some(Command::Prompt { name, input, validated }) => cmd_prompt(&config, &name, &input, validated),
        None => repl::run_interactive(&config, None).await,
    }
}

async fn cmd_run(
    mut config: Config,
    request: &str,
    max_steps: Option<u32>,
    model: Option<String>,
    format: OutputFormat,
    show_debug: bool,
) -> Result<()> {
    debug!(%request, ?max_steps, ?model, %format, show_debug, "cmd_run: called");
    if let Some(model) = model {
        config.llm.model = model;
    }
    if let Some(max) = max_steps {
        config.workflow.max_steps = max;
    }
    config.validate()?;

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let engine = WorkflowEngine::from_config(&config, llm);

    let outcome = engine.run_default(request).await.context("Workflow run failed")?;
    debug!(run_id = %outcome.run_id, "cmd_run: run finished");

    let rendered = match format {
        OutputFormat::Text => render_text(&outcome, show_debug)?,
        OutputFormat::Json => render_json(&outcome)?,
    };
    print!("{}", rendered);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    debug!("cmd_config: called");
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config")?;
    print!("{}", yaml);
    Ok(())
}

fn cmd_prompt(config: &Config, name: &str, input: &str, validated: bool) -> Result<()> {
    debug!(%name, validated, "cmd_prompt: called");
    let loader = PromptLoader::new(&config.workflow.prompts_dir);
    let rendered = match name {
        embedded::CLASSIFY_NAME => loader.classify_prompt(input)?,
        embedded::PLAN_NAME => loader.plan_prompt(input, validated)?,
        _ => {
            return Err(eyre::eyre!(
                "Unknown prompt: {}. Available: {}",
                name,
                embedded::NAMES.join(", ")
            ));
        }
    };
    println!("{}", rendered);
    Ok(())
}
