//! HTTP route handlers for the Userguard API.
//!
//! - `health`: liveness, version and metrics endpoints
//! - `users`: user record CRUD

pub mod health;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// All routes, without middleware. `/users/all` is static and wins over `/users/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/users", post(users::create_user))
        .route("/users/all", get(users::get_all_users))
        .route(
            "/users/{id}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
}
