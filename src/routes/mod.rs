// ABOUTME: HTTP route modules for the FitBot server
// ABOUTME: Exposes the chat exchange router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Coaching exchange endpoint
pub mod chat;

pub use chat::ChatRoutes;
