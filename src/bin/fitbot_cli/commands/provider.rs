// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Provider credential check for fitbot-cli
// ABOUTME: Reports whether a key is configured and lists the models the provider serves

use anyhow::{anyhow, Result};
use fitbot_server::config::LlmConfig;
use fitbot_server::errors::ProviderError;
use fitbot_server::llm::select_provider;

/// Load provider settings, then call `GET /models`
///
/// Every failure is printed and then returned so the process exits non-zero.
pub async fn check() -> Result<()> {
    let config = LlmConfig::from_env().map_err(|e| {
        println!("Error: {}", e.message);
        anyhow!("provider configuration is invalid: {}", e.message)
    })?;

    match config.key_preview() {
        Some(preview) => println!("Key found: {preview}"),
        None => println!("No API key configured for provider '{}'", config.provider),
    }
    println!("Provider: {} at {}", config.provider, config.base_url);

    let provider = select_provider(&config).map_err(|e| {
        println!("Failed to build provider: {e}");
        anyhow!("failed to build provider: {e}")
    })?;

    report(provider.list_models().await)
}

/// Print the model listing outcome; a failed listing is an error
fn report(listing: Result<Vec<String>, ProviderError>) -> Result<()> {
    match listing {
        Ok(models) => {
            println!("Success. Available models:");
            for model in models {
                println!("   - {model}");
            }
            Ok(())
        }
        Err(ProviderError::Status { status, body }) => {
            println!("Failed. Status: {status}");
            println!("Error: {body}");
            Err(anyhow!("provider rejected the key check with status {status}"))
        }
        Err(e) => {
            println!("Request failed: {e}");
            Err(anyhow!("provider key check failed: {e}"))
        }
    }
}
