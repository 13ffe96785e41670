//! WorkflowEngine - drives one request from classification to a final state

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::WorkflowError;
use super::phase::{Phase, Transition, next_phase};
use crate::agent::{IntentClassifier, Planner, guard};
use crate::config::Config;
use crate::domain::{Action, WorkflowState};
use crate::llm::{GenerationParams, LlmClient};
use crate::prompts::PromptLoader;
use crate::tools::ToolExecutor;

/// Final state of a run plus the path it took
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub state: WorkflowState,
    pub transitions: Vec<Transition>,
}

/// Runs the classify, plan, guard, dispatch loop
///
/// The engine holds no per-run state; every call to [`run`](Self::run) starts
/// from a fresh [`WorkflowState`], so one engine can serve concurrent runs.
pub struct WorkflowEngine {
    classifier: IntentClassifier,
    planner: Planner,
    executor: ToolExecutor,
    max_steps: u32,
}

impl WorkflowEngine {
    pub const DEFAULT_MAX_STEPS: u32 = 6;

    /// Create an engine with embedded prompts, default generation
    /// parameters and the standard card tools
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        debug!("WorkflowEngine::new: called");
        Self::with_prompts(llm, PromptLoader::embedded_only(), GenerationParams::default())
    }

    /// Create an engine with explicit prompts and generation parameters
    pub fn with_prompts(llm: Arc<dyn LlmClient>, prompts: PromptLoader, params: GenerationParams) -> Self {
        let prompts = Arc::new(prompts);
        Self {
            classifier: IntentClassifier::new(llm.clone(), prompts.clone(), params),
            planner: Planner::new(llm, prompts, params),
            executor: ToolExecutor::standard(),
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Create an engine from loaded configuration
    pub fn from_config(config: &Config, llm: Arc<dyn LlmClient>) -> Self {
        debug!(
            max_steps = config.workflow.max_steps,
            degrade = config.workflow.degrade_on_llm_error,
            "WorkflowEngine::from_config: called"
        );
        let prompts = PromptLoader::new(&config.workflow.prompts_dir);
        let degrade = config.workflow.degrade_on_llm_error;
        let mut engine = Self::with_prompts(llm, prompts, config.llm.generation_params());
        engine.classifier = engine.classifier.with_degrade_on_llm_error(degrade);
        engine.planner = engine.planner.with_degrade_on_llm_error(degrade);
        engine.max_steps = config.workflow.max_steps;
        engine
    }

    /// Replace the card tools (for testing or alternate backends)
    pub fn with_executor(mut self, executor: ToolExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Treat gateway failures in classifier/planner as unparseable output
    pub fn with_degrade_on_llm_error(mut self, degrade: bool) -> Self {
        self.classifier = self.classifier.with_degrade_on_llm_error(degrade);
        self.planner = self.planner.with_degrade_on_llm_error(degrade);
        self
    }

    /// Override the step budget used by [`run_default`](Self::run_default)
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// `(action, tool name, description)` for each registered card tool
    pub fn tool_descriptions(&self) -> Vec<(Action, &'static str, &'static str)> {
        self.executor.describe()
    }

    /// Configured step budget
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Process one request with the configured step budget
    pub async fn run_default(&self, user_input: &str) -> Result<RunOutcome, WorkflowError> {
        self.run_traced(user_input, self.max_steps).await
    }

    /// Process one request and return the final state
    pub async fn run(&self, user_input: &str, max_steps: u32) -> Result<WorkflowState, WorkflowError> {
        self.run_traced(user_input, max_steps).await.map(|outcome| outcome.state)
    }

    /// Process one request, recording every phase transition
    pub async fn run_traced(&self, user_input: &str, max_steps: u32) -> Result<RunOutcome, WorkflowError> {
        if max_steps == 0 {
            return Err(WorkflowError::InvalidStepBudget);
        }

        let run_id = Uuid::now_v7();
        info!(%run_id, max_steps, input_len = user_input.len(), "Run started");

        let mut state = WorkflowState::new(user_input);
        let mut transitions = Vec::new();
        let mut phase = Phase::Classifying;

        while !phase.is_terminal() {
            match phase {
                Phase::Classifying => {
                    let classification = self.classifier.classify(state.user_input()).await?;
                    debug!(%run_id, intent = %classification.intent, "WorkflowEngine::run: classified");
                    state.apply(classification.into_update());
                }
                Phase::Planning => {
                    let proposed = self.planner.plan(&state).await?;
                    let proposed_action = proposed.next_action;
                    let decision = guard(proposed, state.validated());
                    if decision.next_action != proposed_action {
                        warn!(%run_id, proposed = %proposed_action, "Guard rewrote destructive action to validate");
                    }
                    debug!(%run_id, next_action = %decision.next_action, "WorkflowEngine::run: planned");
                    state.apply(decision.into_update());
                }
                Phase::Dispatching => {
                    let update = self.executor.dispatch(&state).await?;
                    state.apply(update);
                }
                Phase::Stepping => {
                    state.increment_step();
                    debug!(%run_id, step_count = state.step_count(), "WorkflowEngine::run: step complete");
                }
                Phase::Finished => {}
            }

            let next = next_phase(phase, &state, max_steps);
            debug!(%run_id, from = %phase, to = %next, "WorkflowEngine::run: transition");
            transitions.push(Transition::new(phase, next, state.step_count()));
            phase = next;
        }

        info!(
            %run_id,
            step_count = state.step_count(),
            outcome = ?state.outcome(),
            "Run finished"
        );

        Ok(RunOutcome {
            run_id,
            state,
            transitions,
        })
    }
}
