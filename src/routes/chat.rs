// ABOUTME: Chat route handler for the coaching exchange endpoint
// ABOUTME: Builds the prompt, makes one provider call, records the turn, and responds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Chat routes
//!
//! `POST /api/chat` is the whole wire protocol. Each request runs strictly in
//! order: prompt built, provider called once, exchange recorded (best
//! effort), response sent. A provider failure skips recording and answers
//! with the fixed error envelope.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use fitbot_core::errors::{AppError, AppResult};
use fitbot_core::models::{ChatRequest, ChatResponse};
use tracing::{error, field, info, instrument, warn};

use crate::constants::routes;
use crate::llm::synthesize;
use crate::resources::ServerResources;

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::CHAT, post(Self::exchange))
            .with_state(resources)
    }

    /// Handle one exchange
    #[instrument(
        skip_all,
        fields(personality = field::Empty, message_len = field::Empty)
    )]
    async fn exchange(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatRequest>, JsonRejection>,
    ) -> AppResult<Json<ChatResponse>> {
        let Json(request) = payload.map_err(|rejection| {
            AppError::invalid_input(format!("Unreadable chat request: {rejection}"))
        })?;

        let snapshot = request.user_context.resolve();
        let span = tracing::Span::current();
        span.record("personality", snapshot.personality.as_str());
        span.record("message_len", request.message.len());
        info!("Chat message received");

        let system_prompt = synthesize(&request.user_context);

        let reply = resources
            .gateway
            .complete(&system_prompt, &request.message)
            .await
            .map_err(|e| {
                error!(error = %e, "Completion failed; exchange not recorded");
                AppError::from(e)
            })?;

        match resources
            .history
            .record(&request.message, &reply, snapshot.personality)
            .await
        {
            Ok(record_id) => info!(record_id, "Exchange recorded"),
            Err(e) => warn!(error = %e, "Exchange not recorded; reply still sent"),
        }

        Ok(Json(ChatResponse::new(reply)))
    }
}
