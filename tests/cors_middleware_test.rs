// ABOUTME: Tests for the CORS layer built from configured origins
// ABOUTME: Covers wildcard, listed, unlisted, and unusable origin lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::{create_test_resources, StubProvider};
use fitbot_server::config::CorsConfig;
use fitbot_server::server::router;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

async fn app_with_origins(origins: &[&str]) -> axum::Router {
    let resources = create_test_resources(StubProvider::replying("ok")).await;
    let cors = CorsConfig {
        allowed_origins: origins.iter().map(|o| (*o).to_owned()).collect(),
    };
    router(resources, &cors)
}

async fn allowed_origin_for(app: axum::Router, origin: &str) -> Option<String> {
    AxumTestRequest::options("/api/chat")
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .send(app)
        .await
        .header("access-control-allow-origin")
}

#[tokio::test]
async fn test_wildcard_allows_any_origin() {
    let app = app_with_origins(&["*"]).await;
    assert_eq!(
        allowed_origin_for(app, "https://anywhere.example").await.as_deref(),
        Some("*")
    );
}

#[tokio::test]
async fn test_listed_origin_is_echoed() {
    let app = app_with_origins(&["https://app.example.com", "http://localhost:8081"]).await;
    assert_eq!(
        allowed_origin_for(app, "http://localhost:8081").await.as_deref(),
        Some("http://localhost:8081")
    );
}

#[tokio::test]
async fn test_unlisted_origin_is_not_allowed() {
    let app = app_with_origins(&["https://app.example.com"]).await;
    assert!(allowed_origin_for(app, "https://evil.example").await.is_none());
}

#[tokio::test]
async fn test_invalid_entries_are_skipped() {
    let app = app_with_origins(&["https://bad\norigin", "https://app.example.com"]).await;
    assert_eq!(
        allowed_origin_for(app, "https://app.example.com").await.as_deref(),
        Some("https://app.example.com")
    );
}

#[tokio::test]
async fn test_list_without_usable_origin_denies_cross_origin() {
    let app = app_with_origins(&["https://bad\norigin"]).await;
    assert!(allowed_origin_for(app, "https://anywhere.example").await.is_none());
}

#[tokio::test]
async fn test_same_origin_post_still_served_when_cross_origin_denied() {
    let app = app_with_origins(&["https://bad\norigin"]).await;

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({ "message": "hi" }))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    assert!(response.header("access-control-allow-origin").is_none());
}
