// ABOUTME: Configuration management module for server settings
// ABOUTME: Loads listening, persistence, provider, and CORS settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the `FitBot` server
//!
//! Everything is read from environment variables (a `.env` file is loaded by
//! the binaries when present). Only deployment concerns live here: the
//! exchange itself has no behavioral flags.

/// Environment and server configuration
pub mod environment;
/// Shared configuration enums
pub mod types;

pub use environment::{CorsConfig, DatabaseConfig, LlmConfig, ServerConfig};
pub use types::{Environment, LlmProviderType, LogLevel};
