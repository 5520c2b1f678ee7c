// ABOUTME: Client-held conversation log with a single in-flight exchange slot
// ABOUTME: Appends user, ai, and system messages and signals the view after each append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Conversation State
//!
//! The only component that remembers anything across turns. A submit appends
//! the user's message before any network activity, then resolves to exactly
//! one `ai` reply or one `system` error entry. While an exchange is in flight
//! further submits are declined.

use std::sync::Arc;

use fitbot_core::models::{
    ChatRequest, ContextSnapshot, Lifestyle, Personality, CONNECTION_ERROR_TEXT, WELCOME_TEXT,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::api::ChatTransport;

/// Who authored a message in the client log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person using the app
    User,
    /// The coach's reply
    Ai,
    /// Locally generated notice, such as a connection error
    System,
}

/// One immutable entry in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique, increasing within the session
    pub id: u64,
    /// Author
    pub role: Role,
    /// Text shown to the user
    pub content: String,
}

/// Observable state rendered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationState {
    /// Messages in insertion order
    pub messages: Vec<Message>,
    /// Whether an exchange is in flight
    pub loading: bool,
}

/// Result of one [`Conversation::submit`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank after trimming
    Empty,
    /// Another exchange is still in flight
    Busy,
    /// The server replied; the `ai` message was appended
    Replied(Message),
    /// The exchange failed; the `system` message was appended
    Failed(Message),
}

/// Presentation hooks invoked by the conversation
pub trait ConversationObserver: Send + Sync {
    /// A message was appended; the view should scroll to it
    fn scroll_to_latest(&self, latest: &Message);

    /// The loading flag changed
    fn loading_changed(&self, _loading: bool) {}
}

struct Inner {
    state: ConversationState,
    next_id: u64,
    context: ContextSnapshot,
}

impl Inner {
    fn append(&mut self, role: Role, content: impl Into<String>) -> Message {
        let message = Message {
            id: self.next_id,
            role,
            content: content.into(),
        };
        self.next_id += 1;
        self.state.messages.push(message.clone());
        message
    }
}

/// A chat session: message log, loading flag, and the context snapshot sent
/// with every request
pub struct Conversation {
    transport: Arc<dyn ChatTransport>,
    observer: Option<Arc<dyn ConversationObserver>>,
    inner: Mutex<Inner>,
}

impl Conversation {
    /// Start a session with the welcome message and the default context
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self::with_context(transport, ContextSnapshot::default())
    }

    /// Start a session with an explicit context
    #[must_use]
    pub fn with_context(transport: Arc<dyn ChatTransport>, context: ContextSnapshot) -> Self {
        let mut inner = Inner {
            state: ConversationState::default(),
            next_id: 0,
            context,
        };
        inner.append(Role::Ai, WELCOME_TEXT);

        Self {
            transport,
            observer: None,
            inner: Mutex::new(inner),
        }
    }

    /// Attach the presentation layer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Copy of the current log and loading flag
    pub async fn state(&self) -> ConversationState {
        self.inner.lock().await.state.clone()
    }

    /// Context that the next request will carry
    pub async fn context(&self) -> ContextSnapshot {
        self.inner.lock().await.context
    }

    /// Switch the coaching personality
    pub async fn set_personality(&self, personality: Personality) {
        self.inner.lock().await.context.personality = personality;
    }

    /// Set the usage-day count
    pub async fn set_usage_days(&self, usage_days: i64) {
        self.inner.lock().await.context.usage_days = usage_days;
    }

    /// Replace today's lifestyle metrics
    pub async fn set_lifestyle(&self, lifestyle: Lifestyle) {
        self.inner.lock().await.context.lifestyle = lifestyle;
    }

    /// Send `text` as the next user message
    ///
    /// Blank input and input arriving while an exchange is in flight are
    /// declined without touching the log. Otherwise the user message is
    /// appended before the request is sent, and exactly one `ai` or `system`
    /// message follows. Transport failures are reported in the log, never
    /// returned as errors.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Empty;
        }

        let (user_message, request) = {
            let mut inner = self.inner.lock().await;
            if inner.state.loading {
                debug!("Submit declined while an exchange is in flight");
                return SubmitOutcome::Busy;
            }
            let user_message = inner.append(Role::User, text);
            inner.state.loading = true;
            (user_message, ChatRequest::new(text, &inner.context))
        };
        self.notify_append(&user_message);
        self.notify_loading(true);

        let result = self.transport.send(&request).await;

        let outcome = {
            let mut inner = self.inner.lock().await;
            let outcome = match result {
                Ok(response) => SubmitOutcome::Replied(inner.append(Role::Ai, response.reply)),
                Err(e) => {
                    warn!(error = %e, "Exchange failed");
                    SubmitOutcome::Failed(inner.append(Role::System, CONNECTION_ERROR_TEXT))
                }
            };
            inner.state.loading = false;
            outcome
        };

        if let SubmitOutcome::Replied(message) | SubmitOutcome::Failed(message) = &outcome {
            self.notify_append(message);
        }
        self.notify_loading(false);
        outcome
    }

    fn notify_append(&self, message: &Message) {
        if let Some(observer) = &self.observer {
            observer.scroll_to_latest(message);
        }
    }

    fn notify_loading(&self, loading: bool) {
        if let Some(observer) = &self.observer {
            observer.loading_changed(loading);
        }
    }
}
