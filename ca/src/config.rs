//! cardagent configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::GenerationParams;

/// Main cardagent configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Workflow limits and behavior
    pub workflow: WorkflowConfig,
}

impl Config {
    /// Validate configuration before running the workflow
    ///
    /// Checks that the API key environment variable is set and the step
    /// budget is usable. Call this before any remote call to fail fast.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.workflow.max_steps == 0 {
            return Err(eyre::eyre!("workflow.max-steps must be at least 1"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed: a broken config file is reported later by
    /// [`Config::load`] once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = match config_path {
            Some(path) => Some(path.clone()),
            None => Self::candidate_paths().into_iter().find(|p| p.exists()),
        }?;
        let content = fs::read_to_string(path).ok()?;
        let config: Self = serde_yaml::from_str(&content).ok()?;
        config.log_level
    }

    /// Project-local `.cardagent.yml`, then `~/.config/cardagent/cardagent.yml`
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".cardagent.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cardagent").join("cardagent.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("anthropic" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Nucleus sampling cutoff
    #[serde(rename = "top-p")]
    pub top_p: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout_ms: 60_000,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            return Err(eyre::eyre!("Environment variable {} is empty", self.api_key_env));
        }
        Ok(key)
    }

    /// Sampling parameters for every workflow request
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }
}

/// Workflow limits and behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Maximum plan -> dispatch cycles per submission
    #[serde(rename = "max-steps")]
    pub max_steps: u32,

    /// Treat gateway failures in classify/plan as unparseable output
    #[serde(rename = "degrade-on-llm-error")]
    pub degrade_on_llm_error: bool,

    /// Directory holding prompt template overrides
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_steps: 6,
            degrade_on_llm_error: false,
            prompts_dir: PathBuf::from(".cardagent/prompts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.workflow.max_steps, 6);
        assert!(!config.workflow.degrade_on_llm_error);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_llm_config_defaults() {
        let config = LlmConfig::default();

        assert_eq!(config.provider, "anthropic");
        assert!(config.model.contains("sonnet"));
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.generation_params(), GenerationParams::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: DEBUG
llm:
  provider: openai
  model: gpt-4o-mini
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  timeout-ms: 5000
  temperature: 0.2
  max-tokens: 512
  top-p: 0.95

workflow:
  max-steps: 3
  degrade-on-llm-error: true
  prompts-dir: /etc/cardagent/prompts
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.llm.top_p, 0.95);
        assert_eq!(config.workflow.max_steps, 3);
        assert!(config.workflow.degrade_on_llm_error);
        assert_eq!(config.workflow.prompts_dir, PathBuf::from("/etc/cardagent/prompts"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: claude-haiku
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.llm.model, "claude-haiku");

        // Defaults for unspecified
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.max_tokens, 256);
        assert_eq!(config.workflow.max_steps, 6);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardagent.yml");
        fs::write(&path, "log-level: WARN\nworkflow:\n  max-steps: 2\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.workflow.max_steps, 2);
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let path = PathBuf::from("/definitely/not/here/cardagent.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    #[serial]
    fn test_validate_requires_api_key() {
        let mut config = Config::default();
        config.llm.api_key_env = "CARDAGENT_TEST_KEY_VALIDATE".to_string();

        unsafe { std::env::remove_var("CARDAGENT_TEST_KEY_VALIDATE") };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CARDAGENT_TEST_KEY_VALIDATE"));

        unsafe { std::env::set_var("CARDAGENT_TEST_KEY_VALIDATE", "sk-test") };
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.get_api_key().unwrap(), "sk-test");

        config.workflow.max_steps = 0;
        assert!(config.validate().is_err());

        unsafe { std::env::remove_var("CARDAGENT_TEST_KEY_VALIDATE") };
    }

    #[test]
    #[serial]
    fn test_empty_api_key_rejected() {
        let config = LlmConfig {
            api_key_env: "CARDAGENT_TEST_KEY_EMPTY".to_string(),
            ..Default::default()
        };
        unsafe { std::env::set_var("CARDAGENT_TEST_KEY_EMPTY", "  ") };
        assert!(config.get_api_key().is_err());
        unsafe { std::env::remove_var("CARDAGENT_TEST_KEY_EMPTY") };
    }
}
