// ABOUTME: Wire types for the FitBot chat exchange and the behavioral context snapshot
// ABOUTME: Lenient request decoding with defaulting, plus presets and track-record stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exchange Models
//!
//! The client owns a complete [`ContextSnapshot`] and sends it with every
//! message. The server decodes the same JSON into a lenient [`UserContext`]
//! where every field is optional: absent, `null`, or mistyped values are
//! treated as missing and resolved to defaults, never rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt::{Display, Formatter, Result as FmtResult};

// ============================================================================
// Fixed strings and defaults
// ============================================================================

/// Reply text returned by the server whenever an exchange fails
pub const SERVER_ERROR_REPLY: &str = "⚠️ Server Error";

/// Text of the system entry the client appends when an exchange fails
pub const CONNECTION_ERROR_TEXT: &str = "⚠️ Connection Error. Ensure Server is Running.";

/// Greeting shown as the first AI entry of a new conversation
pub const WELCOME_TEXT: &str =
    "👋 Hi! I'm FitBot. I see your stats for today. How can I help you reach your goals?";

/// Usage-day count assumed when the request omits it
pub const DEFAULT_USAGE_DAYS: i64 = 1;

/// Step count assumed when the request omits it
pub const DEFAULT_STEPS: i64 = 0;

/// Sleep hours assumed when the request omits them
pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;

/// Daily step goal used for progress reporting
pub const DAILY_STEP_GOAL: i64 = 10_000;

/// Minimum sleep hours considered restorative
pub const GOOD_SLEEP_HOURS: f64 = 7.0;

// ============================================================================
// Personality
// ============================================================================

/// Coaching personality mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Personality {
    /// Supportive coach
    #[default]
    A,
    /// Creative coach
    B,
    /// Strict coach
    C,
}

impl Personality {
    /// All personality modes in display order
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Single-letter code sent on the wire and stored with history
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Coaching style described to the model
    #[must_use]
    pub const fn style(&self) -> &'static str {
        match self {
            Self::A => "Supportive",
            Self::B => "Creative",
            Self::C => "Strict",
        }
    }

    /// User-facing label for the mode selector
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::A => "🤗 Seeker",
            Self::B => "🎨 Creative",
            Self::C => "🔥 Finisher",
        }
    }

    /// Parse a single-letter code, case-insensitive
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            _ => None,
        }
    }
}

impl Display for Personality {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Lifestyle metrics
// ============================================================================

/// Sleep quality bucket shown on the track record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepQuality {
    /// At least [`GOOD_SLEEP_HOURS`]
    Good,
    /// Below [`GOOD_SLEEP_HOURS`]
    Low,
}

impl SleepQuality {
    /// Status text for the sleep column
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Good => "Restored",
            Self::Low => "Needs Rest",
        }
    }
}

/// Daily step and sleep metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    /// Steps walked today
    pub steps: i64,
    /// Hours slept last night
    pub sleep_hours: f64,
}

impl Lifestyle {
    /// Create lifestyle metrics
    #[must_use]
    pub const fn new(steps: i64, sleep_hours: f64) -> Self {
        Self { steps, sleep_hours }
    }

    /// Metrics a fresh session starts with
    #[must_use]
    pub const fn typical_day() -> Self {
        Self::new(4200, 6.5)
    }

    /// "Healthy day" preset
    #[must_use]
    pub const fn healthy_day() -> Self {
        Self::new(8500, 7.5)
    }

    /// "Lazy day" preset
    #[must_use]
    pub const fn lazy_day() -> Self {
        Self::new(500, 4.5)
    }

    /// Fraction of the daily step goal reached, clamped to `0.0..=1.0`
    #[must_use]
    pub fn step_progress(&self) -> f64 {
        (self.steps as f64 / DAILY_STEP_GOAL as f64).clamp(0.0, 1.0)
    }

    /// Sleep quality bucket for these metrics
    #[must_use]
    pub fn sleep_quality(&self) -> SleepQuality {
        if self.sleep_hours >= GOOD_SLEEP_HOURS {
            SleepQuality::Good
        } else {
            SleepQuality::Low
        }
    }
}

// ============================================================================
// Context snapshot (client-owned, complete)
// ============================================================================

/// Complete behavioral context owned by a client session
///
/// Mutated only through explicit user actions on the client and sent in
/// full with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    /// Coaching personality
    pub personality: Personality,
    /// Days the user has been using the app
    pub usage_days: i64,
    /// Today's lifestyle metrics
    pub lifestyle: Lifestyle,
}

impl ContextSnapshot {
    /// Create a snapshot
    #[must_use]
    pub const fn new(personality: Personality, usage_days: i64, lifestyle: Lifestyle) -> Self {
        Self {
            personality,
            usage_days,
            lifestyle,
        }
    }
}

impl Default for ContextSnapshot {
    fn default() -> Self {
        Self::new(Personality::A, DEFAULT_USAGE_DAYS, Lifestyle::typical_day())
    }
}

// ============================================================================
// User context (server-side, lenient)
// ============================================================================

/// Lifestyle metrics as received on the wire, each field optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleInput {
    /// Steps walked today
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps: Option<i64>,
    /// Hours slept last night
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_hours: Option<f64>,
}

/// Behavioral context as received on the wire
///
/// Every field may be missing; [`UserContext::resolve`] fills the gaps with
/// defaults. Present values are passed through without range checks. Counts
/// accept any whole JSON number (`10` or `10.0`) and personality codes
/// match in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Coaching personality
    #[serde(
        default,
        deserialize_with = "lenient_personality",
        skip_serializing_if = "Option::is_none"
    )]
    pub personality: Option<Personality>,
    /// Days the user has been using the app
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_days: Option<i64>,
    /// Today's lifestyle metrics
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub lifestyle: Option<LifestyleInput>,
}

impl UserContext {
    /// Resolve missing fields to their defaults
    #[must_use]
    pub fn resolve(&self) -> ContextSnapshot {
        let lifestyle = self.lifestyle.unwrap_or_default();
        ContextSnapshot {
            personality: self.personality.unwrap_or_default(),
            usage_days: self.usage_days.unwrap_or(DEFAULT_USAGE_DAYS),
            lifestyle: Lifestyle {
                steps: lifestyle.steps.unwrap_or(DEFAULT_STEPS),
                sleep_hours: lifestyle.sleep_hours.unwrap_or(DEFAULT_SLEEP_HOURS),
            },
        }
    }
}

impl From<&ContextSnapshot> for UserContext {
    fn from(snapshot: &ContextSnapshot) -> Self {
        Self {
            personality: Some(snapshot.personality),
            usage_days: Some(snapshot.usage_days),
            lifestyle: Some(LifestyleInput {
                steps: Some(snapshot.lifestyle.steps),
                sleep_hours: Some(snapshot.lifestyle.sleep_hours),
            }),
        }
    }
}

// ============================================================================
// Request / Response
// ============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub message: String,
    /// Context snapshot attached to the message
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub user_context: UserContext,
}

impl ChatRequest {
    /// Build a fresh request from a message and the sender's snapshot
    #[must_use]
    pub fn new(message: impl Into<String>, snapshot: &ContextSnapshot) -> Self {
        Self {
            message: message.into(),
            user_context: UserContext::from(snapshot),
        }
    }
}

/// Body returned by `POST /api/chat` on success and on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model reply, or the fixed error text
    pub reply: String,
}

impl ChatResponse {
    /// Successful reply
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }

    /// Fixed failure envelope
    #[must_use]
    pub fn server_error() -> Self {
        Self::new(SERVER_ERROR_REPLY)
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

/// Decode a field, treating `null` and type mismatches as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decode a personality code in any letter case
fn lenient_personality<'de, D>(deserializer: D) -> Result<Option<Personality>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(Personality::from_code))
}

/// Decode a count from any integral JSON number, so `10` and `10.0` agree
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => Ok(integral(&number)),
        _ => Ok(None),
    }
}

/// Whole-number value of `number`; fractional or out-of-range values are `None`
fn integral(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract().abs() < f64::EPSILON)
            .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Decode a field, falling back to `T::default()` when unusable
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_context_decodes() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "How many steps today?",
            "userContext": {
                "personality": "C",
                "usageDays": 10,
                "lifestyle": { "steps": 8500, "sleepHours": 7.5 }
            }
        }))
        .unwrap();

        let snapshot = request.user_context.resolve();
        assert_eq!(request.message, "How many steps today?");
        assert_eq!(snapshot.personality, Personality::C);
        assert_eq!(snapshot.usage_days, 10);
        assert_eq!(snapshot.lifestyle, Lifestyle::healthy_day());
    }

    #[test]
    fn test_missing_context_resolves_to_defaults() {
        let request: ChatRequest = serde_json::from_value(json!({"message": "hi"})).unwrap();
        let snapshot = request.user_context.resolve();

        assert_eq!(snapshot.personality, Personality::A);
        assert_eq!(snapshot.usage_days, 1);
        assert_eq!(snapshot.lifestyle.steps, 0);
        assert!((snapshot.lifestyle.sleep_hours - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mistyped_fields_are_treated_as_absent() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "hi",
            "userContext": {
                "personality": "Z",
                "usageDays": "ten",
                "lifestyle": { "steps": null, "sleepHours": 6 }
            }
        }))
        .unwrap();

        let snapshot = request.user_context.resolve();
        assert_eq!(snapshot.personality, Personality::A);
        assert_eq!(snapshot.usage_days, 1);
        assert_eq!(snapshot.lifestyle.steps, 0);
        assert!((snapshot.lifestyle.sleep_hours - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_whole_floats_and_lowercase_codes_are_kept() {
        let request: ChatRequest = serde_json::from_value(json!({
            "message": "How many steps today?",
            "userContext": {
                "personality": "c",
                "usageDays": 10.0,
                "lifestyle": { "steps": 8500.0, "sleepHours": 7.5 }
            }
        }))
        .unwrap();

        assert_eq!(
            request.user_context.resolve(),
            ContextSnapshot::new(Personality::C, 10, Lifestyle::healthy_day())
        );
    }

    #[test]
    fn test_fractional_counts_are_treated_as_absent() {
        let request: ChatRequest = serde_json::from_value(json!({
            "userContext": { "usageDays": 2.5, "lifestyle": { "steps": 10.25 } }
        }))
        .unwrap();

        let snapshot = request.user_context.resolve();
        assert_eq!(snapshot.usage_days, 1);
        assert_eq!(snapshot.lifestyle.steps, 0);
    }

    #[test]
    fn test_null_user_context_and_message() {
        let request: ChatRequest =
            serde_json::from_value(json!({"message": null, "userContext": null})).unwrap();
        assert!(request.message.is_empty());
        assert_eq!(request.user_context, UserContext::default());
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let request: ChatRequest = serde_json::from_value(json!({
            "userContext": { "usageDays": 0, "lifestyle": { "steps": -5 } }
        }))
        .unwrap();

        let snapshot = request.user_context.resolve();
        assert_eq!(snapshot.usage_days, 0);
        assert_eq!(snapshot.lifestyle.steps, -5);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let snapshot = ContextSnapshot::new(Personality::B, 10, Lifestyle::lazy_day());
        let value = serde_json::to_value(ChatRequest::new("hello", &snapshot)).unwrap();

        assert_eq!(
            value,
            json!({
                "message": "hello",
                "userContext": {
                    "personality": "B",
                    "usageDays": 10,
                    "lifestyle": { "steps": 500, "sleepHours": 4.5 }
                }
            })
        );
    }

    #[test]
    fn test_track_record_stats() {
        assert!((Lifestyle::healthy_day().step_progress() - 0.85).abs() < 1e-9);
        assert!((Lifestyle::new(25_000, 8.0).step_progress() - 1.0).abs() < f64::EPSILON);
        assert!(Lifestyle::new(-10, 8.0).step_progress().abs() < f64::EPSILON);
        assert_eq!(Lifestyle::healthy_day().sleep_quality(), SleepQuality::Good);
        assert_eq!(Lifestyle::lazy_day().sleep_quality(), SleepQuality::Low);
        assert_eq!(Lifestyle::new(0, 7.0).sleep_quality(), SleepQuality::Good);
    }

    #[test]
    fn test_personality_codes() {
        assert_eq!(Personality::from_code("c"), Some(Personality::C));
        assert_eq!(Personality::from_code(" B "), Some(Personality::B));
        assert_eq!(Personality::from_code("D"), None);
        assert_eq!(Personality::C.to_string(), "C");
        assert_eq!(Personality::C.style(), "Strict");
    }

    #[test]
    fn test_server_error_envelope() {
        let value = serde_json::to_value(ChatResponse::server_error()).unwrap();
        assert_eq!(value, json!({"reply": "⚠️ Server Error"}));
    }
}
