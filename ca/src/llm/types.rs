//! LLM request/response types
//!
//! The gateway is a plain text-completion call: one prompt in, raw text out.
//! Any structure in the output is the caller's concern.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 256,
            top_p: 1.0,
        }
    }
}

/// A single completion request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Fully rendered prompt
    pub prompt: String,

    pub temperature: f32,

    pub max_tokens: u32,

    pub top_p: f32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, params: &GenerationParams) -> Self {
        let prompt = prompt.into();
        debug!(prompt_len = prompt.len(), ?params, "GenerateRequest::new: called");
        Self {
            prompt,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Raw generated text, trimmed; may or may not be JSON
    pub text: String,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage for logging
    pub usage: TokenUsage,
}

impl GenerateResponse {
    /// Response carrying only text (used by test doubles)
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// True when the provider cut the output at the token limit
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::MaxTokens
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
}

impl StopReason {
    /// Parse from Anthropic API stop_reason string
    pub fn from_anthropic(s: &str) -> Self {
        debug!(%s, "StopReason::from_anthropic: called");
        match s {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from OpenAI API finish_reason string
    pub fn from_openai(s: Option<&str>) -> Self {
        debug!(?s, "StopReason::from_openai: called");
        match s {
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
