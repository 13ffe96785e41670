//! Planner - chooses the next action from the current state

use std::sync::Arc;

use tracing::{debug, warn};

use super::classifier::PARSE_ERROR_REASON;
use super::parse::{parse_json_object, string_field};
use crate::domain::{Action, Intent, StateUpdate, WorkflowState};
use crate::llm::{GenerateRequest, GenerationParams, LlmClient};
use crate::prompts::PromptLoader;
use crate::workflow::WorkflowError;

/// Message shown to the user when the planner output is unusable
pub const APOLOGY_MESSAGE: &str = "I'm sorry, I couldn't process that.";

/// A structured planning decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDecision {
    pub next_action: Action,
    /// `None` keeps the intent already in state
    pub intent: Option<Intent>,
    pub assistant_message: String,
    pub reason: String,
}

impl PlanDecision {
    /// Safe terminal decision used whenever the model output is unusable
    pub fn parse_error() -> Self {
        Self {
            next_action: Action::Finish,
            intent: None,
            assistant_message: APOLOGY_MESSAGE.to_string(),
            reason: PARSE_ERROR_REASON.to_string(),
        }
    }

    pub fn into_update(self) -> StateUpdate {
        StateUpdate {
            next_action: Some(self.next_action),
            intent: self.intent,
            assistant_message: Some(self.assistant_message),
            plan_reason: Some(self.reason),
            ..Default::default()
        }
    }
}

/// Turn raw planner output into a [`PlanDecision`]
///
/// Missing or unrecognized `next_action` becomes `finish`, never a
/// destructive action.
pub fn parse_decision(text: &str) -> PlanDecision {
    debug!(text_len = text.len(), "parse_decision: called");
    let Some(obj) = parse_json_object(text) else {
        warn!("parse_decision: output is not a JSON object");
        return PlanDecision::parse_error();
    };

    let next_action = match string_field(&obj, "next_action") {
        Some(label) => Action::parse(label).unwrap_or_else(|| {
            warn!(%label, "parse_decision: unrecognized next_action, finishing");
            Action::Finish
        }),
        None => {
            debug!("parse_decision: next_action missing, finishing");
            Action::Finish
        }
    };

    PlanDecision {
        next_action,
        intent: string_field(&obj, "intent").and_then(Intent::parse),
        assistant_message: string_field(&obj, "assistant_message").unwrap_or_default().to_string(),
        reason: string_field(&obj, "reason").unwrap_or_default().to_string(),
    }
}

/// LLM-driven planner
///
/// Only `user_input` and `validated` from the state reach the prompt.
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    params: GenerationParams,
    degrade_on_llm_error: bool,
}

impl Planner {
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

    /// Ask the model for the next action (unguarded)
    pub async fn plan(&self, state: &WorkflowState) -> Result<PlanDecision, WorkflowError> {
        debug!(validated = state.validated(), step_count = state.step_count(), "Planner::plan: called");
        let prompt = self
            .prompts
            .plan_prompt(state.user_input(), state.validated())
            .map_err(|e| WorkflowError::Prompt(e.to_string()))?;

        let response = match self.llm.generate(GenerateRequest::new(prompt, &self.params)).await {
            Ok(response) => response,
            Err(e) if self.degrade_on_llm_error && e.is_remote() => {
                warn!(error = %e, "Planner::plan: gateway failed, degrading");
                return Ok(PlanDecision::parse_error());
            }
            Err(e) => return Err(e.into()),
        };

        if response.is_truncated() {
            warn!(max_tokens = self.params.max_tokens, "Planner::plan: output hit the token limit");
        }
        let decision = parse_decision(&response.text);
        debug!(next_action = %decision.next_action, "Planner::plan: done");
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockReply};

    fn planner(client: MockLlmClient) -> Planner {
        Planner::new(
            Arc::new(client),
            Arc::new(PromptLoader::embedded_only()),
            GenerationParams::default(),
        )
    }

    #[test]
    fn test_parse_full_decision() {
        let d = parse_decision(
            r#"{"next_action":"cancel","intent":"cancel","assistant_message":"Cancelling now.","reason":"validated"}"#,
        );
        assert_eq!(d.next_action, Action::Cancel);
        assert_eq!(d.intent, Some(Intent::Cancel));
        assert_eq!(d.assistant_message, "Cancelling now.");
        assert_eq!(d.reason, "validated");
    }

    #[test]
    fn test_parse_non_json_is_apology() {
        let d = parse_decision("Let me validate the card first.");
        assert_eq!(d, PlanDecision::parse_error());
        assert_eq!(d.next_action, Action::Finish);
        assert_eq!(d.assistant_message, APOLOGY_MESSAGE);
        assert_eq!(d.reason, "parse_error");
    }

    #[test]
    fn test_parse_missing_next_action_finishes() {
        let d = parse_decision(r#"{"assistant_message":"Could you clarify?"}"#);
        assert_eq!(d.next_action, Action::Finish);
        assert_eq!(d.assistant_message, "Could you clarify?");
        assert_eq!(d.reason, "");
        assert_eq!(d.intent, None);
    }

    #[test]
    fn test_parse_unrecognized_next_action_finishes() {
        for label in ["delete_account", "escalate", "", "REPLACE_ALL"] {
            let text = serde_json::json!({ "next_action": label }).to_string();
            assert_eq!(parse_decision(&text).next_action, Action::Finish, "label {label:?}");
        }
    }

    #[test]
    fn test_parse_non_string_next_action_finishes() {
        assert_eq!(parse_decision(r#"{"next_action": ["cancel"]}"#).next_action, Action::Finish);
    }

    #[test]
    fn test_into_update_keeps_intent_when_absent() {
        let update = parse_decision(r#"{"next_action":"validate"}"#).into_update();
        assert_eq!(update.next_action, Some(Action::Validate));
        assert!(update.intent.is_none());
        assert!(update.result.is_none());
    }

    #[tokio::test]
    async fn test_plan_prompt_reflects_validation() {
        let client = Arc::new(MockLlmClient::new([r#"{"next_action":"finish"}"#]));
        let planner = Planner::new(
            client.clone(),
            Arc::new(PromptLoader::embedded_only()),
            GenerationParams::default(),
        );
        let mut state = WorkflowState::new("replace my card");
        state.apply(StateUpdate::validated("ok"));

        planner.plan(&state).await.unwrap();

        let prompt = &client.prompts()[0];
        assert!(prompt.contains("last_user_message: replace my card"));
        assert!(prompt.contains("validated: true"));
    }

    #[tokio::test]
    async fn test_plan_gateway_error_is_fatal_by_default() {
        let result = planner(MockLlmClient::failing(502)).plan(&WorkflowState::new("x")).await;
        assert!(matches!(result, Err(WorkflowError::Llm(_))));
    }

    #[tokio::test]
    async fn test_plan_gateway_error_degrades_when_enabled() {
        let d = planner(MockLlmClient::failing(502))
            .with_degrade_on_llm_error(true)
            .plan(&WorkflowState::new("x"))
            .await
            .unwrap();
        assert_eq!(d, PlanDecision::parse_error());
    }

    #[tokio::test]
    async fn test_plan_truncated_output_finishes() {
        let reply = MockReply::Truncated(r#"{"next_action":"replace","reason":"lo"#.to_string());
        let d = planner(MockLlmClient::new([reply])).plan(&WorkflowState::new("x")).await.unwrap();
        assert_eq!(d.next_action, Action::Finish);
        assert_eq!(d.assistant_message, APOLOGY_MESSAGE);
    }
}
