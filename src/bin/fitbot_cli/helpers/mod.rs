// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for fitbot-cli
// ABOUTME: Provides terminal rendering for the chat session

pub mod display;
