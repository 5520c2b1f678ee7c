// ABOUTME: Completion provider selection from configuration
// ABOUTME: Builds the OpenAI-compatible provider for the Groq or local preset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! `FITBOT_LLM_PROVIDER` picks the preset:
//! - `groq` (default): hosted Groq, requires `GROQ_API_KEY`
//! - `local`/`ollama`/`vllm`/`localai`: any `OpenAI`-compatible server

use std::sync::Arc;

use fitbot_core::errors::ProviderError;
use tracing::info;

use super::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::config::LlmConfig;

/// Build the provider named by configuration
///
/// # Errors
///
/// Returns `ProviderError::Configuration` if a required key is missing or
/// the HTTP client cannot be built.
pub fn select_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, ProviderError> {
    if config.provider.requires_api_key() && config.api_key.is_none() {
        return Err(ProviderError::Configuration(format!(
            "provider '{}' requires an API key",
            config.provider
        )));
    }

    info!(
        "Initializing LLM provider: {} (model {})",
        config.provider, config.model
    );

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(config))?;
    Ok(Arc::new(provider))
}
