// ABOUTME: Shared server resources composed once at startup
// ABOUTME: Holds the history store, exchange recorder, and completion gateway for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use fitbot_core::errors::AppResult;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::{Database, HistoryRecorder};
use crate::llm::{select_provider, CompletionGateway, LlmProvider};

/// Everything a request handler needs, passed explicitly as router state
#[derive(Clone)]
pub struct ServerResources {
    /// History store handle, closed at shutdown
    pub database: Database,
    /// Exchange recorder over `database`
    pub history: HistoryRecorder,
    /// Bounded single-attempt completion call
    pub gateway: CompletionGateway,
}

impl ServerResources {
    /// Compose resources from an open store and a gateway
    #[must_use]
    pub fn new(database: Database, gateway: CompletionGateway) -> Self {
        let history = HistoryRecorder::new(database.clone());
        Self {
            database,
            history,
            gateway,
        }
    }

    /// Open the store and build the provider named by configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the provider cannot
    /// be constructed.
    pub async fn from_config(config: &ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        let provider: Arc<dyn LlmProvider> = select_provider(&config.llm)?;
        info!(
            provider = provider.name(),
            model = provider.default_model(),
            "Completion provider ready"
        );

        Ok(Self::new(
            database,
            CompletionGateway::new(provider, config.llm.timeout),
        ))
    }
}
