//! Request pipeline composition.
//!
//! Stages in the order a request passes through them (the last `.layer`
//! call below is the outermost):
//!
//! 1. request/response logging (`TraceLayer`)
//! 2. panic recovery
//! 3. security response headers
//! 4. payload scanning (POST/PUT only)
//! 5. route handler

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::{payload_guard, recovery, security_headers};
use crate::routes;
use crate::state::AppState;

/// The full application: all routes wrapped in the middleware pipeline.
pub fn build_app(state: AppState) -> Router {
    let router = routes::router().with_state(state.clone());
    with_pipeline(router, &state)
}

/// Wraps an already-stated router in the middleware pipeline.
pub fn with_pipeline(router: Router, state: &AppState) -> Router {
    router
        .layer(DefaultBodyLimit::max(state.config.limits.max_body_bytes))
        .layer(from_fn_with_state(state.clone(), payload_guard::payload_guard_middleware))
        .layer(from_fn_with_state(
            state.config.clone(),
            security_headers::security_headers_middleware,
        ))
        .layer(recovery::catch_panic_layer(state.config.clone()))
        .layer(TraceLayer::new_for_http())
}
