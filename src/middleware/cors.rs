// ABOUTME: CORS middleware configuration for the chat endpoint
// ABOUTME: Lets browser and mobile web clients call the API from other origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Build the CORS layer from configured origins
///
/// `*` or an empty list allows any origin; otherwise only the listed origins
/// are allowed. Unparseable entries are skipped with a warning, and a list
/// with no usable entry denies every cross-origin request.
///
/// ```bash
/// # Allow specific origins
/// export CORS_ALLOWED_ORIGINS="https://app.example.com,http://localhost:8081"
/// ```
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_methods([Method::POST, Method::OPTIONS])
}

fn allow_origin(configured: &[String]) -> AllowOrigin {
    if configured.is_empty() || configured.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("No valid CORS origins configured; cross-origin requests will be denied");
    }
    AllowOrigin::list(origins)
}
