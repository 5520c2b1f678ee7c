// ABOUTME: Persistence error type for the append-only exchange history
// ABOUTME: Logged by the server and never surfaced to chat clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Failure of the history store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The store could not be opened
    #[error("failed to open history store: {0}")]
    Connection(String),
    /// The schema could not be created
    #[error("failed to initialize history schema: {0}")]
    Schema(String),
    /// A history record could not be written
    #[error("failed to insert history record: {0}")]
    Insert(String),
    /// History could not be read back
    #[error("failed to query history: {0}")]
    Query(String),
}

#[cfg(feature = "database-errors")]
impl PersistenceError {
    /// Opening the pool failed
    #[must_use]
    pub fn connection(error: &sqlx::Error) -> Self {
        Self::Connection(error.to_string())
    }

    /// Schema creation failed
    #[must_use]
    pub fn schema(error: &sqlx::Error) -> Self {
        Self::Schema(error.to_string())
    }

    /// Insert failed
    #[must_use]
    pub fn insert(error: &sqlx::Error) -> Self {
        Self::Insert(error.to_string())
    }

    /// Read failed
    #[must_use]
    pub fn query(error: &sqlx::Error) -> Self {
        Self::Query(error.to_string())
    }
}
