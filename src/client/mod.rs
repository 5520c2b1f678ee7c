// ABOUTME: Chat client core shared by presentation layers
// ABOUTME: Conversation state machine and the transport used to reach the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Client side of the exchange. Rendering is left to a
//! [`ConversationObserver`]; this module only owns the log and the wire call.

/// Transport to the chat endpoint
pub mod api;
/// Conversation log and submit state machine
pub mod conversation;

pub use api::{ChatTransport, ClientError, HttpChatClient};
pub use conversation::{
    Conversation, ConversationObserver, ConversationState, Message, Role, SubmitOutcome,
};
