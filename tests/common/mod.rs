//! Shared test utilities and fixtures
//!
//! Mock validator and fix-suggestion endpoints on a `wiremock` server.

#![allow(dead_code)]

use std::time::Duration;

use querylens_services::{HttpQueryService, ServiceConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALIDATE_PATH: &str = "/api/query/validate";
pub const SUGGEST_FIX_PATH: &str = "/api/query/suggestfix";

/// HTTP service pointed at the mock server with a short timeout.
pub fn service_for(server: &MockServer) -> HttpQueryService {
    let config = ServiceConfig::new(&server.uri())
        .expect("mock server uri is a valid base url")
        .with_timeout(Duration::from_secs(5));
    HttpQueryService::new(config).expect("client builds")
}

/// Validator answers with the given issue strings.
pub async fn mount_issues(server: &MockServer, issues: &[&str]) {
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(issues)))
        .mount(server)
        .await;
}

/// Validator answers with the given issue strings after `delay`.
pub async fn mount_slow_issues(server: &MockServer, issues: &[&str], delay: Duration) {
    Mock::given(method("POST"))
        .and(path(VALIDATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(issues))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Fix-suggestion service answers in the DocsBot shape.
pub async fn mount_suggestion(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path(SUGGEST_FIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": answer,
            "sources": []
        })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .mount(server)
        .await;
}
