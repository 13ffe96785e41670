//! Gateway error types

use std::time::Duration;
use thiserror::Error;

/// Failure of a single completion call
///
/// The gateway never retries. Whether a failure ends the run or degrades to
/// a safe default is the workflow's call.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Provider throttled the request (retry in {retry_after:?})")]
    RateLimited { retry_after: Duration },

    #[error("Provider returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Could not reach provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unusable completion: {0}")]
    InvalidResponse(String),

    #[error("Gateway misconfigured: {0}")]
    Config(String),

    #[error("Malformed provider payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// False only for local setup problems (missing key, unknown provider)
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}
