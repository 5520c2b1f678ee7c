// ABOUTME: Tests for the client conversation log and submit state machine
// ABOUTME: Covers ordering, single in-flight exchange, error entries, ids, and observer hooks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fitbot_server::client::{
    ChatTransport, ClientError, Conversation, ConversationObserver, Message, Role, SubmitOutcome,
};
use fitbot_server::models::{
    ChatRequest, ChatResponse, ContextSnapshot, Lifestyle, Personality, CONNECTION_ERROR_TEXT,
    WELCOME_TEXT,
};
use tokio::sync::Notify;

// ============================================================================
// Test transports and observers
// ============================================================================

/// Answers every request, optionally waiting on a gate first
struct ScriptedTransport {
    result: Result<String, ()>,
    gate: Option<Arc<Notify>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedTransport {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(reply.to_owned()),
            gate: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Err(()),
            gate: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn gated(reply: &str, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(reply.to_owned()),
            gate: Some(gate),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.result {
            Ok(reply) => Ok(ChatResponse::new(reply.clone())),
            Err(()) => Err(ClientError::Network("connection refused".to_owned())),
        }
    }
}

#[derive(Default)]
struct RecordingObserver {
    scrolled_to: Mutex<Vec<u64>>,
    loading: Mutex<Vec<bool>>,
}

impl ConversationObserver for RecordingObserver {
    fn scroll_to_latest(&self, latest: &Message) {
        self.scrolled_to.lock().unwrap().push(latest.id);
    }

    fn loading_changed(&self, loading: bool) {
        self.loading.lock().unwrap().push(loading);
    }
}

async fn wait_until_loading(conversation: &Conversation) {
    for _ in 0..200 {
        if conversation.state().await.loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("conversation never entered the loading state");
}

// ============================================================================
// Initial state
// ============================================================================

#[tokio::test]
async fn test_new_conversation_starts_with_welcome() {
    let conversation = Conversation::new(ScriptedTransport::replying("unused"));
    let state = conversation.state().await;

    assert!(!state.loading);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].id, 0);
    assert_eq!(state.messages[0].role, Role::Ai);
    assert_eq!(state.messages[0].content, WELCOME_TEXT);
    assert_eq!(conversation.context().await, ContextSnapshot::default());
}

// ============================================================================
// Submit
// ============================================================================

#[tokio::test]
async fn test_successful_submit_appends_user_then_ai() {
    let transport = ScriptedTransport::replying("Nice work!");
    let conversation = Conversation::new(transport.clone());

    let outcome = conversation.submit("I walked today").await;

    let state = conversation.state().await;
    assert!(!state.loading);
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1].role, Role::User);
    assert_eq!(state.messages[1].content, "I walked today");
    assert_eq!(state.messages[2].role, Role::Ai);
    assert_eq!(state.messages[2].content, "Nice work!");
    assert_eq!(outcome, SubmitOutcome::Replied(state.messages[2].clone()));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_failed_submit_appends_system_entry() {
    let conversation = Conversation::new(ScriptedTransport::failing());

    let outcome = conversation.submit("hello?").await;

    let state = conversation.state().await;
    assert!(!state.loading);
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1].role, Role::User);
    assert_eq!(state.messages[2].role, Role::System);
    assert_eq!(state.messages[2].content, CONNECTION_ERROR_TEXT);
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let transport = ScriptedTransport::replying("unused");
    let conversation = Conversation::new(transport.clone());

    assert_eq!(conversation.submit("").await, SubmitOutcome::Empty);
    assert_eq!(conversation.submit("   \t ").await, SubmitOutcome::Empty);

    assert_eq!(conversation.state().await.messages.len(), 1);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_user_message_is_visible_before_reply_and_second_submit_is_declined() {
    let gate = Arc::new(Notify::new());
    let transport = ScriptedTransport::gated("done", gate.clone());
    let conversation = Arc::new(Conversation::new(transport.clone()));

    let first = {
        let conversation = conversation.clone();
        tokio::spawn(async move { conversation.submit("first").await })
    };
    wait_until_loading(&conversation).await;

    let in_flight = conversation.state().await;
    assert_eq!(in_flight.messages.len(), 2);
    assert_eq!(in_flight.messages[1].content, "first");

    assert_eq!(conversation.submit("second").await, SubmitOutcome::Busy);
    assert_eq!(conversation.state().await.messages.len(), 2);

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Replied(_)));

    let state = conversation.state().await;
    assert!(!state.loading);
    assert_eq!(state.messages.len(), 3);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_ids_are_unique_and_increasing() {
    let conversation = Conversation::new(ScriptedTransport::replying("ok"));

    conversation.submit("one").await;
    conversation.submit("two").await;

    let ids: Vec<u64> = conversation
        .state()
        .await
        .messages
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

// ============================================================================
// Context
// ============================================================================

#[tokio::test]
async fn test_request_carries_current_context() {
    let transport = ScriptedTransport::replying("ok");
    let conversation = Conversation::new(transport.clone());

    conversation.set_personality(Personality::C).await;
    conversation.set_usage_days(10).await;
    conversation.set_lifestyle(Lifestyle::healthy_day()).await;
    conversation.submit("How am I doing?").await;

    let request = &transport.requests()[0];
    assert_eq!(request.message, "How am I doing?");
    assert_eq!(
        request.user_context.resolve(),
        ContextSnapshot::new(Personality::C, 10, Lifestyle::healthy_day())
    );
}

#[tokio::test]
async fn test_explicit_starting_context() {
    let snapshot = ContextSnapshot::new(Personality::B, 5, Lifestyle::lazy_day());
    let transport = ScriptedTransport::replying("ok");
    let conversation = Conversation::with_context(transport.clone(), snapshot);

    conversation.submit("hi").await;

    assert_eq!(transport.requests()[0].user_context.resolve(), snapshot);
}

// ============================================================================
// Observer
// ============================================================================

#[tokio::test]
async fn test_observer_scrolls_after_each_append() {
    let observer = Arc::new(RecordingObserver::default());
    let conversation =
        Conversation::new(ScriptedTransport::replying("ok")).with_observer(observer.clone());

    conversation.submit("hi").await;
    conversation.submit("   ").await;

    assert_eq!(*observer.scrolled_to.lock().unwrap(), vec![1, 2]);
    assert_eq!(*observer.loading.lock().unwrap(), vec![true, false]);
}
