// ABOUTME: Environment-based configuration management for deployment settings
// ABOUTME: Reads port, database URL, completion provider, and CORS settings with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::time::Duration;

use fitbot_core::errors::{AppError, AppResult};
use tracing::{info, warn};

use super::types::{Environment, LlmProviderType, LogLevel};
use crate::constants::{defaults, env_vars, providers};

/// Server configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listening port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// History store settings
    pub database: DatabaseConfig,
    /// Completion provider settings
    pub llm: LlmConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
}

/// History store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL (`sqlite:./chat.db`, `sqlite::memory:`)
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_owned(),
        }
    }
}

/// Completion provider configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Which provider preset is selected
    pub provider: LlmProviderType,
    /// OpenAI-compatible base URL
    pub base_url: String,
    /// Model identifier sent with each request
    pub model: String,
    /// Bearer token, if any
    pub api_key: Option<String>,
    /// Upper bound on one provider call
    pub timeout: Duration,
}

// Keeps the key out of debug logs
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.key_preview())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(defaults::CORS_ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the selected completion provider
    /// requires an API key that is not set.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: http_port_from_env(),
            host: env_var_or(env_vars::HOST, defaults::HOST),
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: env_var_or(env_vars::DATABASE_URL, defaults::DATABASE_URL),
            },
            llm: LlmConfig::from_env()?,
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or(
                    env_vars::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                )),
            },
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Human-readable configuration summary, free of secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitBot Server Configuration:\n\
             - Listen: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - LLM Provider: {} ({})\n\
             - LLM Model: {}\n\
             - LLM API Key: {}\n\
             - LLM Timeout: {}s\n\
             - CORS Origins: {}",
            self.bind_address(),
            self.environment,
            self.log_level,
            self.database.url,
            self.llm.provider,
            self.llm.base_url,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Not set"
            },
            self.llm.timeout.as_secs(),
            self.cors.allowed_origins.join(", "),
        )
    }
}

impl LlmConfig {
    /// Load provider settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `FITBOT_LLM_PROVIDER` selects Groq
    /// and `GROQ_API_KEY` is missing or empty.
    pub fn from_env() -> AppResult<Self> {
        let provider = env::var(env_vars::LLM_PROVIDER)
            .map(|s| LlmProviderType::from_str_or_default(&s))
            .unwrap_or_default();

        let key_var = match provider {
            LlmProviderType::Groq => env_vars::GROQ_API_KEY,
            LlmProviderType::Local => env_vars::LOCAL_LLM_API_KEY,
        };
        let api_key = non_empty_env(key_var);

        if provider.requires_api_key() && api_key.is_none() {
            return Err(AppError::config(format!(
                "{key_var} must be set when {} is '{provider}'",
                env_vars::LLM_PROVIDER
            )));
        }

        let timeout_secs = match env::var(env_vars::LLM_TIMEOUT_SECS) {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .unwrap_or_else(|| {
                    warn!(
                        "Invalid {}='{raw}', using default {}s",
                        env_vars::LLM_TIMEOUT_SECS,
                        defaults::LLM_TIMEOUT_SECS
                    );
                    defaults::LLM_TIMEOUT_SECS
                }),
            Err(_) => defaults::LLM_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            base_url: non_empty_env(env_vars::LLM_BASE_URL)
                .unwrap_or_else(|| provider.default_base_url().to_owned()),
            model: non_empty_env(env_vars::LLM_MODEL)
                .unwrap_or_else(|| provider.default_model().to_owned()),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// First characters of the API key, for diagnostics
    #[must_use]
    pub fn key_preview(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let head: String = key.chars().take(providers::KEY_PREVIEW_CHARS).collect();
            format!("{head}...")
        })
    }
}

/// `HTTP_PORT` wins over `PORT`; unparseable values fall back to the default
fn http_port_from_env() -> u16 {
    [env_vars::HTTP_PORT, env_vars::PORT]
        .iter()
        .find_map(|key| env::var(key).ok())
        .map_or(defaults::HTTP_PORT, |raw| {
            raw.parse().unwrap_or_else(|_| {
                warn!("Invalid port '{raw}', using default {}", defaults::HTTP_PORT);
                defaults::HTTP_PORT
            })
        })
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
