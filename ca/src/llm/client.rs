//! LlmClient trait definition

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, LlmError};

/// Stateless text-completion gateway
///
/// Each call is independent: no conversation is kept between calls, and no
/// retries are attempted. Implementations must be shareable across runs.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one prompt and return the raw generated text
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}

/// Scripted client for tests
pub mod mock {
    use super::*;
    use crate::llm::StopReason;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// One scripted reply
    #[derive(Debug, Clone)]
    pub enum MockReply {
        Text(String),
        /// Text cut off at the token limit
        Truncated(String),
        Error { status: u16, message: String },
    }

    impl From<&str> for MockReply {
        fn from(text: &str) -> Self {
            MockReply::Text(text.to_string())
        }
    }

    impl From<String> for MockReply {
        fn from(text: String) -> Self {
            MockReply::Text(text)
        }
    }

    /// Returns queued replies in order; errors once exhausted unless a
    /// fallback reply is set
    pub struct MockLlmClient {
        replies: Vec<MockReply>,
        fallback: Option<MockReply>,
        call_count: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlmClient {
        pub fn new<I, R>(replies: I) -> Self
        where
            I: IntoIterator<Item = R>,
            R: Into<MockReply>,
        {
            let replies: Vec<MockReply> = replies.into_iter().map(Into::into).collect();
            debug!(reply_count = %replies.len(), "MockLlmClient::new: called");
            Self {
                replies,
                fallback: None,
                call_count: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        /// Reply with `fallback` forever after the queue runs out
        pub fn with_fallback(mut self, fallback: impl Into<MockReply>) -> Self {
            self.fallback = Some(fallback.into());
            self
        }

        /// Client whose every call fails with an API error
        pub fn failing(status: u16) -> Self {
            Self::new(Vec::<MockReply>::new()).with_fallback(MockReply::Error {
                status,
                message: "mock failure".to_string(),
            })
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Prompts received so far, in call order
        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockLlmClient::generate: called");
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(request.prompt);
            }

            let reply = self.replies.get(idx).or(self.fallback.as_ref()).cloned();
            match reply {
                Some(MockReply::Text(text)) => Ok(GenerateResponse::text(text)),
                Some(MockReply::Truncated(text)) => Ok(GenerateResponse {
                    stop_reason: StopReason::MaxTokens,
                    ..GenerateResponse::text(text)
                }),
                Some(MockReply::Error { status, message }) => Err(LlmError::ApiError { status, message }),
                None => {
                    debug!("MockLlmClient::generate: no more mock replies");
                    Err(LlmError::InvalidResponse("No more mock responses".to_string()))
                }
            }
        }
    }

}
