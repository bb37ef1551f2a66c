use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::error::GenerationError;
use crate::models::GenerationRequest;
use crate::prompt::ChatPrompt;

/// Platform-native text generation backend.
///
/// The CLI implements this with reqwest against a hosted chat-completion API;
/// tests use scripted fakes. Any error counts as one failed attempt.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay after attempt `n` fails is `base_delay * n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Stateless wrapper adding bounded retry with linear backoff to an
/// [`InferenceProvider`].
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn InferenceProvider>,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn InferenceProvider>, policy: RetryPolicy) -> Self {
        let policy = RetryPolicy {
            max_attempts: policy.max_attempts.max(1),
            ..policy
        };
        Self { provider, policy }
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let prompt = ChatPrompt::for_request(request);
        let max_attempts = self.policy.max_attempts;

        let mut attempt = 1;
        loop {
            let err = match self.attempt(&prompt).await {
                Ok(text) => {
                    debug!(attempt, chars = text.len(), "recipe generated");
                    return Ok(text);
                }
                Err(err) => err,
            };

            if attempt >= max_attempts {
                error!(attempts = attempt, "recipe generation exhausted retries: {err}");
                return Err(GenerationError::Exhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            let delay = self.policy.delay_after(attempt);
            warn!(
                "generation attempt {attempt}/{max_attempts} failed: {err} - retrying in {}ms",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt(&self, prompt: &ChatPrompt) -> Result<String, GenerationError> {
        let text = self
            .provider
            .complete(prompt)
            .await
            .map_err(|e| GenerationError::Upstream(format!("{e:#}")))?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}
