// ABOUTME: System-wide constants and configuration defaults for the FitBot server
// ABOUTME: Environment variable names, default values, limits, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Environment variable names and the defaults applied when they are unset.

/// Environment variable names read at startup
pub mod env_vars {
    /// Listening port (takes precedence over `PORT`)
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Listening port fallback used by common hosting platforms
    pub const PORT: &str = "PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// History store connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Completion provider selection (`groq` or `local`)
    pub const LLM_PROVIDER: &str = "FITBOT_LLM_PROVIDER";
    /// Base URL override for the completion provider
    pub const LLM_BASE_URL: &str = "FITBOT_LLM_BASE_URL";
    /// Model override for the completion provider
    pub const LLM_MODEL: &str = "FITBOT_LLM_MODEL";
    /// Upper bound on one provider call, in seconds
    pub const LLM_TIMEOUT_SECS: &str = "FITBOT_LLM_TIMEOUT_SECS";
    /// Groq API key
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
    /// Optional key for local OpenAI-compatible servers
    pub const LOCAL_LLM_API_KEY: &str = "LOCAL_LLM_API_KEY";
    /// Comma-separated list of allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Default values used when configuration is absent
pub mod defaults {
    /// Default listening port
    pub const HTTP_PORT: u16 = 5000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default history store, created next to the working directory
    pub const DATABASE_URL: &str = "sqlite:./chat.db";
    /// Default provider call bound
    pub const LLM_TIMEOUT_SECS: u64 = 30;
    /// Default allowed origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Default `FitBot` server address used by the terminal client
    pub const CLIENT_SERVER_URL: &str = "http://localhost:5000";
}

/// Completion provider presets
pub mod providers {
    /// Groq OpenAI-compatible endpoint
    pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
    /// Groq default model
    pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
    /// Local default endpoint (Ollama)
    pub const LOCAL_BASE_URL: &str = "http://localhost:11434/v1";
    /// Local default model
    pub const LOCAL_DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";
    /// Connect timeout applied by the HTTP client
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Characters of an API key shown in diagnostics
    pub const KEY_PREVIEW_CHARS: usize = 5;
}

/// HTTP route paths
pub mod routes {
    /// The single exchange endpoint
    pub const CHAT: &str = "/api/chat";
}

/// Service names for structured logging
pub mod service_names {
    /// The chat server
    pub const FITBOT_SERVER: &str = "fitbot-server";
    /// The terminal client
    pub const FITBOT_CLI: &str = "fitbot-cli";
}
