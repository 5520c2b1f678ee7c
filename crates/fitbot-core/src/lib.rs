// ABOUTME: Core types for the FitBot coaching exchange
// ABOUTME: Foundation crate with wire types, context defaults, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitBot` Core
//!
//! Foundation crate shared by the `FitBot` server and its chat clients. It is
//! designed to change infrequently so both sides of the wire agree on one
//! definition of the exchange.
//!
//! ## Modules
//!
//! - **models**: `ChatRequest`, `ChatResponse`, `UserContext`, `ContextSnapshot`
//! - **errors**: `AppError`, `ErrorCode`, `ProviderError`, `PersistenceError`

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Wire types and behavioral context attached to every exchange
pub mod models;
