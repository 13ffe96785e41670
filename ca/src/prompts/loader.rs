//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to the
//! embedded defaults, then renders them with Handlebars.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Variables available to the classify template
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyContext<'a> {
    pub user_input: &'a str,
}

/// Variables available to the plan template
#[derive(Debug, Clone, Serialize)]
pub struct PlanContext<'a> {
    pub user_input: &'a str,
    pub validated: bool,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (e.g., `.cardagent/prompts/`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that prefers `{override_dir}/{name}.pmt` when present
    pub fn new(override_dir: impl AsRef<Path>) -> Self {
        let override_dir = override_dir.as_ref();
        let exists = override_dir.is_dir();
        debug!(?override_dir, %exists, "PromptLoader::new: called");

        Self {
            hbs: Self::engine(),
            override_dir: exists.then(|| override_dir.to_path_buf()),
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    /// Prompts are plain text sent to a model; HTML escaping would mangle quotes
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks the override directory first, then the embedded fallback.
    pub fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found override");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
        }

        embedded::get_embedded(name)
            .map(str::to_string)
            .ok_or_else(|| eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the intent classification prompt
    pub fn classify_prompt(&self, user_input: &str) -> Result<String> {
        self.render(embedded::CLASSIFY_NAME, &ClassifyContext { user_input })
    }

    /// Render the planner prompt
    pub fn plan_prompt(&self, user_input: &str, validated: bool) -> Result<String> {
        self.render(embedded::PLAN_NAME, &PlanContext { user_input, validated })
    }
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self::embedded_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_classify_prompt_embeds_message() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.classify_prompt("please cancel my card ending 4321").unwrap();

        assert!(prompt.contains("Message: please cancel my card ending 4321"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_plan_prompt_embeds_state() {
        let loader = PromptLoader::embedded_only();

        let unvalidated = loader.plan_prompt("replace my card", false).unwrap();
        assert!(unvalidated.contains("last_user_message: replace my card"));
        assert!(unvalidated.contains("validated: false"));

        let validated = loader.plan_prompt("replace my card", true).unwrap();
        assert!(validated.contains("validated: true"));
    }

    #[test]
    fn test_render_does_not_html_escape() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.classify_prompt("my \"gold\" card & <pin>").unwrap();
        assert!(prompt.contains("my \"gold\" card & <pin>"));
    }

    #[test]
    fn test_empty_input_renders() {
        let loader = PromptLoader::embedded_only();
        let prompt = loader.classify_prompt("").unwrap();
        assert!(prompt.trim_end().ends_with("Message:"));
    }

    #[test]
    fn test_override_directory_wins() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("classify.pmt"), "CUSTOM {{user_input}}").unwrap();

        let loader = PromptLoader::new(temp.path());
        assert_eq!(loader.classify_prompt("hi").unwrap(), "CUSTOM hi");

        // No plan override, so the embedded template is used
        assert!(loader.plan_prompt("hi", false).unwrap().contains("autonomous planner"));
    }

    #[test]
    fn test_missing_override_directory_falls_back() {
        let loader = PromptLoader::new("/definitely/not/a/prompts/dir");
        assert!(loader.classify_prompt("hi").unwrap().contains("Classify"));
    }

    #[test]
    fn test_unknown_template() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}
