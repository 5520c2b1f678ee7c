// ABOUTME: History store handle backed by a SQLite connection pool
// ABOUTME: Opens the store once at startup, creates the schema idempotently, and closes on shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # History Store
//!
//! One long-lived [`Database`] is opened at process start and handed to the
//! [`HistoryRecorder`]. The schema is created with `IF NOT EXISTS`, so opening
//! the same file across restarts is safe.

mod history;

pub use history::{HistoryRecord, HistoryRecorder};

use std::str::FromStr;

use fitbot_core::errors::PersistenceError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Exclusively owned handle to the history store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the store at `database_url` and create the schema
    ///
    /// File-backed stores are created when absent. In-memory stores are held
    /// on a single connection that is never recycled, so the data lives as
    /// long as the handle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Connection` if the store cannot be opened
    /// and `PersistenceError::Schema` if the table cannot be created.
    pub async fn new(database_url: &str) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PersistenceError::connection(&e))?
            .create_if_missing(true);

        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| PersistenceError::connection(&e))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("History store ready at {database_url}");
        Ok(db)
    }

    /// Create the history table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Schema` if the statement fails
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_msg TEXT NOT NULL,
                ai_msg TEXT NOT NULL,
                personality TEXT NOT NULL,
                timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::schema(&e))?;

        debug!("History schema verified");
        Ok(())
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Release every connection; later operations fail
    pub async fn close(&self) {
        self.pool.close().await;
        info!("History store closed");
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
