// ABOUTME: Completion provider abstraction for the coaching exchange
// ABOUTME: Defines the provider contract, transcript types, and the bounded completion gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The exchange needs one thing from a language model: turn a two-message
//! transcript (synthesized system prompt plus the user's message) into one
//! reply string. Providers implement [`LlmProvider`]; the handler talks to
//! them only through [`CompletionGateway`], which enforces the single
//! attempt and the time bound.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitbot_server::llm::{ChatMessage, CompletionRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = CompletionRequest::new(vec![
//!         ChatMessage::system("You are a fitness AI companion."),
//!         ChatMessage::user("What's a good warm-up routine?"),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gateway;
mod openai_compatible;
pub mod prompts;
mod provider;

pub use gateway::CompletionGateway;
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use prompts::synthesize;
pub use provider::select_provider;

use async_trait::async_trait;
use fitbot_core::errors::ProviderError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the provider transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in the provider transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One completion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Transcript sent to the provider
    pub messages: Vec<ChatMessage>,
    /// Model identifier; the provider default when absent
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Create a new request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Reply from a completion call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated reply text
    pub content: String,
    /// Model that produced the reply
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Completion provider contract
///
/// Implementations make exactly one upstream call per [`LlmProvider::complete`]
/// and report every failure as a [`ProviderError`]. Retrying is never the
/// provider's job.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "groq", "ollama")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &str;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// List model identifiers the provider serves
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        Ok(vec![self.default_model().to_owned()])
    }

    /// Check that the provider is reachable and the credentials are accepted
    async fn health_check(&self) -> Result<bool, ProviderError> {
        self.list_models().await.map(|models| !models.is_empty())
    }
}
