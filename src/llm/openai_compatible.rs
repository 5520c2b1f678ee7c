// ABOUTME: OpenAI-compatible completion provider for Groq and local endpoints
// ABOUTME: Sends the chat completions request and maps every failure onto ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! One implementation serves both the hosted Groq API and local servers such
//! as Ollama, vLLM, and `LocalAI`: they all speak the `OpenAI` chat
//! completions dialect. Presets differ only in base URL, default model, and
//! whether a bearer token is sent.
//!
//! ## Supported Backends
//!
//! - **Groq**: <https://api.groq.com/openai/v1>
//! - **Ollama**: <http://localhost:11434/v1>
//! - **vLLM**: <http://localhost:8000/v1>
//! - **`LocalAI`**: <http://localhost:8080/v1>

use std::time::Duration;

use async_trait::async_trait;
use fitbot_core::errors::ProviderError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, TokenUsage};
use crate::config::{LlmConfig, LlmProviderType};
use crate::constants::{defaults, providers};

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    stream: bool,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    #[serde(default)]
    message: Option<OpenAiResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// `GET /models` response
#[derive(Debug, Deserialize)]
struct OpenAiModelList {
    #[serde(default)]
    data: Vec<OpenAiModel>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModel {
    id: String,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: String,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
}

impl std::fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("default_model", &self.default_model)
            .field("provider_name", &self.provider_name)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleConfig {
    /// Hosted Groq endpoint
    #[must_use]
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            base_url: providers::GROQ_BASE_URL.to_owned(),
            api_key: Some(api_key.into()),
            default_model: providers::GROQ_DEFAULT_MODEL.to_owned(),
            provider_name: "groq",
            display_name: "Groq".to_owned(),
            request_timeout: Duration::from_secs(defaults::LLM_TIMEOUT_SECS),
        }
    }

    /// Local server reachable at `base_url`; names are inferred from the port
    #[must_use]
    pub fn local(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let (provider_name, display_name) = if base_url.contains(":11434") {
            ("ollama", "Ollama (Local)")
        } else if base_url.contains(":8000") {
            ("vllm", "vLLM (Local)")
        } else if base_url.contains(":8080") {
            ("localai", "LocalAI")
        } else {
            ("local", "Local LLM")
        };

        Self {
            base_url,
            api_key: None,
            default_model: model.into(),
            provider_name,
            display_name: display_name.to_owned(),
            request_timeout: Duration::from_secs(defaults::LLM_TIMEOUT_SECS),
        }
    }

    /// Build from loaded server configuration
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        let preset = match config.provider {
            LlmProviderType::Groq => Self::groq(config.api_key.clone().unwrap_or_default()),
            LlmProviderType::Local => Self::local(&config.base_url, &config.model),
        };

        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            request_timeout: config.timeout,
            ..preset
        }
    }

    /// Override the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible completion provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(providers::CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );

        Ok(Self { client, config })
    }

    /// Provider configuration
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Add authorization header if API key is configured
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(api_key) if !api_key.is_empty() => {
                request.header("Authorization", format!("Bearer {api_key}"))
            }
            _ => request,
        }
    }

    /// Map a reqwest failure onto the provider error taxonomy
    fn transport_error(&self, e: &reqwest::Error) -> ProviderError {
        error!("Request to {} failed: {}", self.config.provider_name, e);
        if e.is_timeout() {
            ProviderError::Timeout {
                elapsed: self.config.request_timeout,
            }
        } else if e.is_connect() {
            ProviderError::Transport(format!(
                "Cannot connect to {} at {}",
                self.config.display_name, self.config.base_url
            ))
        } else {
            ProviderError::Transport(e.to_string())
        }
    }

    /// Send a prepared request and return the body of a 2xx response
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
        let response = self
            .add_auth_header(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Self::parse_error_response(status, &body))
        }
    }

    /// Parse error response from API
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> ProviderError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body)
            .map_or_else(|_| body.to_owned(), |parsed| parsed.error.message);
        error!("Provider returned {status}: {detail}");
        ProviderError::status(status.as_u16(), &detail)
    }

    /// Extract the reply from a 2xx completion body
    fn parse_completion(
        body: &str,
        fallback_model: &str,
    ) -> Result<CompletionResponse, ProviderError> {
        let parsed: OpenAiResponse = serde_json::from_str(body).map_err(|e| {
            error!(
                "Failed to parse API response: {} - body: {}",
                e,
                body.chars()
                    .take(ProviderError::BODY_PREVIEW_CHARS)
                    .collect::<String>()
            );
            ProviderError::Malformed(format!("Failed to parse response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("API returned no choices".to_owned()))?;

        let content = choice
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| ProviderError::Malformed("First choice has no content".to_owned()))?;

        Ok(CompletionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| fallback_model.to_owned()),
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &str {
        &self.config.display_name
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(
        skip(self, request),
        fields(
            provider = self.config.provider_name,
            model = %request.model.as_deref().unwrap_or(&self.config.default_model)
        )
    )]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let body = OpenAiRequest {
            model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            stream: false,
        };

        debug!(
            "Sending chat completion request with {} messages",
            body.messages.len()
        );

        let text = self
            .execute(self.client.post(self.api_url("chat/completions")).json(&body))
            .await?;

        let response = Self::parse_completion(&text, model)?;
        debug!(
            "Received response: {} chars, finish_reason: {:?}",
            response.content.len(),
            response.finish_reason
        );
        Ok(response)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let text = self.execute(self.client.get(self.api_url("models"))).await?;

        let list: OpenAiModelList = serde_json::from_str(&text)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse model list: {e}")))?;

        Ok(list.data.into_iter().map(|model| model.id).collect())
    }
}
