// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides stub completion providers, test databases, and server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitbot_server`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use fitbot_server::{
    config::CorsConfig,
    database::{Database, HistoryRecorder},
    errors::ProviderError,
    llm::{CompletionGateway, CompletionRequest, CompletionResponse, LlmProvider},
    resources::ServerResources,
    server::router,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// In-memory history store
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("in-memory database")
}

/// What a [`StubProvider`] does when called
#[derive(Clone)]
pub enum StubBehavior {
    /// Return this reply
    Reply(String),
    /// Fail with this error
    Fail(ProviderError),
    /// Never answer
    Hang,
}

/// Completion provider that records calls instead of reaching a network
pub struct StubProvider {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubProvider {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn replying(reply: &str) -> Arc<Self> {
        Self::new(StubBehavior::Reply(reply.to_owned()))
    }

    pub fn failing(error: ProviderError) -> Arc<Self> {
        Self::new(StubBehavior::Fail(error))
    }

    pub fn hanging() -> Arc<Self> {
        Self::new(StubBehavior::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &str {
        "Stub Provider"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.behavior {
            StubBehavior::Reply(reply) => Ok(CompletionResponse {
                content: reply.clone(),
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            StubBehavior::Fail(error) => Err(error.clone()),
            StubBehavior::Hang => std::future::pending().await,
        }
    }
}

/// Resources wired to a stub provider and an in-memory store
pub async fn create_test_resources(provider: Arc<StubProvider>) -> Arc<ServerResources> {
    create_test_resources_with_timeout(provider, Duration::from_secs(5)).await
}

pub async fn create_test_resources_with_timeout(
    provider: Arc<StubProvider>,
    timeout: Duration,
) -> Arc<ServerResources> {
    let database = create_test_database().await;
    let gateway = CompletionGateway::new(provider, timeout);
    Arc::new(ServerResources::new(database, gateway))
}

/// Full application router over the given resources
pub fn create_test_router(resources: Arc<ServerResources>) -> axum::Router {
    router(resources, &CorsConfig::default())
}

/// Count history rows through a fresh recorder
pub async fn history_count(resources: &ServerResources) -> i64 {
    HistoryRecorder::new(resources.database.clone())
        .count()
        .await
        .expect("count history")
}
