// ABOUTME: Main library entry point for the FitBot coaching server and chat client
// ABOUTME: Exposes the exchange pipeline, history store, HTTP surface, and client state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitBot` Server
//!
//! A conversational fitness coach. A chat client sends each message together
//! with a small behavioral context (personality mode, usage days, steps,
//! sleep). The server turns that context into a system prompt, relays the
//! message to a hosted language model, records the exchange, and returns the
//! reply.
//!
//! ## Architecture
//!
//! - **LLM**: prompt synthesis, provider abstraction, bounded completion gateway
//! - **Database**: append-only exchange history in `SQLite`
//! - **Routes**: `POST /api/chat`, the whole wire protocol
//! - **Client**: conversation log and transport for presentation layers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitbot_server::config::ServerConfig;
//! use fitbot_server::resources::ServerResources;
//! use fitbot_server::server::FitbotServer;
//! use fitbot_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::from_config(&config).await?;
//!     FitbotServer::new(config, resources).run().await
//! }
//! ```

/// Chat client core: conversation state and transport
pub mod client;

/// Configuration management
pub mod config;

/// Environment variable names and defaults
pub mod constants;

/// Exchange history store
pub mod database;

/// Completion providers, prompt synthesis, and the completion gateway
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

pub use fitbot_core::errors;
pub use fitbot_core::models;
