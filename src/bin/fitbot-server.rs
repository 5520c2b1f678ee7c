// ABOUTME: FitBot chat server binary
// ABOUTME: Loads configuration, opens the history store, and serves POST /api/chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `FitBot` Server Binary
//!
//! ```bash
//! GROQ_API_KEY=gsk_... fitbot-server --http-port 5000
//! ```

use anyhow::Result;
use clap::Parser;
use fitbot_server::{
    config::ServerConfig, logging, resources::ServerResources, server::FitbotServer,
};
use tracing::{error, info};

/// Command-line arguments for the server binary
#[derive(Parser)]
#[command(name = "fitbot-server")]
#[command(about = "FitBot - conversational fitness coaching API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("No .env file loaded: {e}");
    }

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env().inspect_err(|e| {
        error!("Configuration error: {e}");
    })?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting FitBot server");
    info!("{}", config.summary());

    let resources = ServerResources::from_config(&config).await.inspect_err(|e| {
        error!("Failed to initialize server resources: {e}");
    })?;

    FitbotServer::new(config, resources).run().await?;
    Ok(())
}
