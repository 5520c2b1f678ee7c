// ABOUTME: System prompt synthesis from the user's behavioral context
// ABOUTME: Pure rendering of personality, usage days, and lifestyle into the coaching instruction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! The system instruction is rebuilt for every exchange from the context the
//! client sends. Rendering is deterministic and never validates ranges.

use fitbot_core::models::{ContextSnapshot, UserContext};

/// Policy clause forbidding medical advice
pub const MEDICAL_POLICY: &str = "Refuse medical questions.";

/// Policy clause capping reply length
pub const LENGTH_POLICY: &str = "Keep answer under 100 words.";

/// Render the system instruction for a request's context
///
/// Absent fields take their defaults first, so an empty context and the
/// explicit defaults produce identical prompts.
#[must_use]
pub fn synthesize(context: &UserContext) -> String {
    render(&context.resolve())
}

/// Render the system instruction for a fully resolved snapshot
#[must_use]
pub fn render(snapshot: &ContextSnapshot) -> String {
    format!(
        "You are a fitness AI companion.\n\
         Personality: {personality} (A=Supportive, B=Creative, C=Strict).\n\
         User Stats: Days {days}, Steps {steps}, Sleep {sleep}h.\n\
         {MEDICAL_POLICY} {LENGTH_POLICY}",
        personality = snapshot.personality,
        days = snapshot.usage_days,
        steps = snapshot.lifestyle.steps,
        sleep = snapshot.lifestyle.sleep_hours,
    )
}
