// ABOUTME: Client transport for the chat endpoint
// ABOUTME: ChatTransport trait plus the reqwest-backed HttpChatClient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use fitbot_core::models::{ChatRequest, ChatResponse};
use reqwest::Client;
use tracing::debug;

use crate::constants::routes;

/// Why an exchange did not produce a reply on the client side
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server could not be reached or the connection dropped
    #[error("network error: {0}")]
    Network(String),
    /// No answer within the client's bound
    #[error("request timed out")]
    Timeout,
    /// The server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(u16),
    /// The body was not a reply envelope
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Sends one chat request and waits for its reply
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Perform one exchange
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
}

/// HTTP transport talking to a `FitBot` server
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    endpoint: String,
}

impl HttpChatClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), routes::CHAT),
        })
    }

    /// Full URL of the chat endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Chat endpoint returned {status}");
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
