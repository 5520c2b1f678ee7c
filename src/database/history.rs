// ABOUTME: Append-only exchange history written after each successful completion
// ABOUTME: One insert per exchange, never updated, with count/latest reads for audit tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use fitbot_core::errors::PersistenceError;
use fitbot_core::models::Personality;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use tracing::debug;

use super::Database;

/// One durable audit row for a successful exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Auto-incrementing identifier
    pub id: i64,
    /// The user's message
    pub user_msg: String,
    /// The model's reply
    pub ai_msg: String,
    /// Personality in effect for the exchange
    pub personality: Personality,
    /// Server-assigned creation time (UTC)
    pub timestamp: NaiveDateTime,
}

/// Writes exchange history
#[derive(Clone)]
pub struct HistoryRecorder {
    database: Database,
}

impl HistoryRecorder {
    /// Create a recorder over an open store
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Append one exchange and return its row id
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Insert` if the write fails
    pub async fn record(
        &self,
        user_msg: &str,
        ai_msg: &str,
        personality: Personality,
    ) -> Result<i64, PersistenceError> {
        let result = sqlx::query(
            r"
            INSERT INTO history (user_msg, ai_msg, personality)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_msg)
        .bind(ai_msg)
        .bind(personality.as_str())
        .execute(self.database.pool())
        .await
        .map_err(|e| PersistenceError::insert(&e))?;

        let id = result.last_insert_rowid();
        debug!(record_id = id, "History record inserted");
        Ok(id)
    }

    /// Number of recorded exchanges
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Query` if the read fails
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM history")
            .fetch_one(self.database.pool())
            .await
            .map_err(|e| PersistenceError::query(&e))?;

        row.try_get("total").map_err(|e| PersistenceError::query(&e))
    }

    /// Most recent exchanges, newest first
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Query` if the read fails
    pub async fn latest(&self, limit: i64) -> Result<Vec<HistoryRecord>, PersistenceError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_msg, ai_msg, personality, timestamp
            FROM history
            ORDER BY id DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.database.pool())
        .await
        .map_err(|e| PersistenceError::query(&e))?;

        rows.iter()
            .map(|r| {
                let personality: String = r.try_get("personality")?;
                Ok(HistoryRecord {
                    id: r.try_get("id")?,
                    user_msg: r.try_get("user_msg")?,
                    ai_msg: r.try_get("ai_msg")?,
                    personality: Personality::from_code(&personality).unwrap_or_default(),
                    timestamp: r.try_get("timestamp")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()
            .map_err(|e| PersistenceError::query(&e))
    }
}
