// ABOUTME: Completion provider error type for the upstream language-model call
// ABOUTME: Every failure of the single provider attempt maps onto one ProviderError variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

/// Failure of the upstream completion call
///
/// Produced for network errors, timeouts, non-2xx statuses, and payloads
/// missing the reply text. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be sent or the response could not be read
    #[error("provider transport error: {0}")]
    Transport(String),
    /// The provider did not answer within the configured bound
    #[error("provider timed out after {}s", elapsed.as_secs())]
    Timeout {
        /// Time waited before giving up
        elapsed: Duration,
    },
    /// The provider answered with a non-success status
    #[error("provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },
    /// The provider answered 2xx but the payload lacked a usable reply
    #[error("malformed provider response: {0}")]
    Malformed(String),
    /// The provider could not be constructed from configuration
    #[error("provider configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Maximum characters of an upstream body kept in the error
    pub const BODY_PREVIEW_CHARS: usize = 200;

    /// Build a status error, truncating the body preview
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(Self::BODY_PREVIEW_CHARS).collect(),
        }
    }
}
