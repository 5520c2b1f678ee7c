// ABOUTME: FitBot CLI - terminal chat client and provider diagnostics
// ABOUTME: Chats with a running FitBot server and checks completion provider credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Chat with a local server
//! fitbot-cli chat --server http://localhost:5000
//!
//! # Verify the provider key and list available models
//! fitbot-cli check-provider
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitbot_server::constants::{defaults, service_names};
use fitbot_server::logging::{LogFormat, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "fitbot-cli",
    about = "FitBot terminal client",
    long_about = "Chat with a FitBot server from the terminal and check completion provider credentials."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Open an interactive chat session
    Chat {
        /// `FitBot` server base URL
        #[arg(long, default_value = defaults::CLIENT_SERVER_URL)]
        server: String,

        /// Seconds to wait for each reply
        #[arg(long, default_value = "60")]
        timeout_secs: u64,
    },

    /// Check the completion provider key and list its models
    CheckProvider,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {e}");
    }

    let mut logging = LoggingConfig::for_service(service_names::FITBOT_CLI);
    logging.format = LogFormat::Compact;
    let level = if cli.verbose { "debug" } else { "warn" };
    logging.level = level.to_owned();
    logging.init()?;

    match cli.command {
        Command::Chat {
            server,
            timeout_secs,
        } => commands::chat::run(&server, timeout_secs).await,
        Command::CheckProvider => commands::provider::check().await,
    }
}
