// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for fitbot-cli
// ABOUTME: Provides the chat session and provider check commands

pub mod chat;
pub mod provider;
