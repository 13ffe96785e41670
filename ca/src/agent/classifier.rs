//! IntentClassifier - first pass over the customer's message

use std::sync::Arc;

use tracing::{debug, warn};

use super::parse::{parse_json_object, string_field};
use crate::domain::{Intent, StateUpdate};
use crate::llm::{GenerateRequest, GenerationParams, LlmClient};
use crate::prompts::PromptLoader;
use crate::workflow::WorkflowError;

/// Reason recorded when model output could not be parsed
pub const PARSE_ERROR_REASON: &str = "parse_error";

/// Intent plus the model's rationale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub reason: String,
}

impl Classification {
    /// Fallback used whenever the model output is unusable
    pub fn parse_error() -> Self {
        Self {
            intent: Intent::Unknown,
            reason: PARSE_ERROR_REASON.to_string(),
        }
    }

    pub fn into_update(self) -> StateUpdate {
        StateUpdate {
            intent: Some(self.intent),
            intent_reason: Some(self.reason),
            ..Default::default()
        }
    }
}

/// Turn raw classifier output into a [`Classification`]
///
/// A missing `intent` field is a parse failure; an unrecognized label maps to
/// `unknown` and keeps the model's reason.
pub fn parse_classification(text: &str) -> Classification {
    debug!(text_len = text.len(), "parse_classification: called");
    let Some(obj) = parse_json_object(text) else {
        warn!("parse_classification: output is not a JSON object");
        return Classification::parse_error();
    };

    let Some(label) = string_field(&obj, "intent") else {
        warn!("parse_classification: missing intent field");
        return Classification::parse_error();
    };

    Classification {
        intent: Intent::parse(label).unwrap_or_default(),
        reason: string_field(&obj, "reason").unwrap_or_default().to_string(),
    }
}

/// Classifies a customer message into an [`Intent`]
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    params: GenerationParams,
    degrade_on_llm_error: bool,
}

impl IntentClassifier {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptLoader>, params: GenerationParams) -> Self {
        Self {
            llm,
            prompts,
            params,
            degrade_on_llm_error: false,
        }
    }

    /// Treat gateway failures like unparseable output instead of failing
    pub fn with_degrade_on_llm_error(mut self, degrade: bool) -> Self {
        self.degrade_on_llm_error = degrade;
        self
    }

    /// Classify `user_input`; never fails on malformed model output
    pub async fn classify(&self, user_input: &str) -> Result<Classification, WorkflowError> {
        debug!(input_len = user_input.len(), "IntentClassifier::classify: called");
        let prompt = self
            .prompts
            .classify_prompt(user_input)
            .map_err(|e| WorkflowError::Prompt(e.to_string()))?;

        let response = match self.llm.generate(GenerateRequest::new(prompt, &self.params)).await {
            Ok(response) => response,
            Err(e) if self.degrade_on_llm_error && e.is_remote() => {
                warn!(error = %e, "IntentClassifier::classify: gateway failed, degrading");
                return Ok(Classification::parse_error());
            }
            Err(e) => return Err(e.into()),
        };

        if response.is_truncated() {
            warn!(max_tokens = self.params.max_tokens, "IntentClassifier::classify: output hit the token limit");
        }
        let classification = parse_classification(&response.text);
        debug!(intent = %classification.intent, "IntentClassifier::classify: done");
        Ok(classification)
    }
}
