//! Integration and unit tests for the Userguard application.
//!
//! ## Test Modules
//!
//! - **api_tests**: User CRUD endpoints driven through the full pipeline
//! - **pipeline_tests**: Payload guard, security headers, body limits and panic recovery
//! - **error_tests**: Error type display and HTTP mapping
//! - **config_tests**: Configuration loading and validation
//! - **health_api_tests**: Health, version and metrics endpoints
//!
//! Unit tests for the scanner, decoder and store live beside their modules.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! cargo test api_tests
//! ```

pub mod health_api_tests;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{app::build_app, config::AppConfig, state::AppState};

pub(crate) fn setup_test_app() -> (Router, AppState) {
    let state = AppState::new(AppConfig::default());
    (build_app(state.clone()), state)
}

pub(crate) fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

/// Sends a request and returns status, headers and the body parsed as JSON
/// (`Value::Null` for an empty body).
pub(crate) async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let (status, headers, bytes) = send_raw(app, req).await;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, headers, body)
}

pub(crate) async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}
