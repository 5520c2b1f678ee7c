// ABOUTME: Completion gateway wrapping one provider call in a time bound
// ABOUTME: Builds the system+user transcript and returns the reply text or a ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use fitbot_core::errors::ProviderError;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::{ChatMessage, CompletionRequest, LlmProvider};

/// Sends `{system prompt, user message}` to the configured provider
///
/// Exactly one upstream call per [`CompletionGateway::complete`]. A failure
/// is returned to the caller immediately; there is no retry path.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl CompletionGateway {
    /// Wrap a provider with a per-call bound
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// The wrapped provider
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Per-call bound
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The two-message transcript sent upstream
    #[must_use]
    pub fn transcript(&self, system_prompt: &str, user_message: &str) -> CompletionRequest {
        CompletionRequest::new(vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ])
        .with_model(self.provider.default_model())
    }

    /// Run one completion and return the reply text
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged, or `ProviderError::Timeout`
    /// when no answer arrives within the bound.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let request = self.transcript(system_prompt, user_message);

        let response = timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| {
                warn!("Provider call exceeded {}s", self.timeout.as_secs());
                ProviderError::Timeout {
                    elapsed: self.timeout,
                }
            })??;

        debug!(model = %response.model, "Completion received");
        Ok(response.content)
    }
}
