//! # Userguard Backend Library
//!
//! A small in-memory user CRUD service whose write endpoints are guarded by a
//! recursive JSON payload scanner that rejects XSS-looking content.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server and routing
//! - **tower-http**: tracing and panic recovery layers
//! - **Tokio**: Async runtime
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`app`]: Middleware pipeline composition
//! - [`config`]: Application configuration management
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`metrics`]: Request and scanner counters
//! - [`middleware`]: Security headers, panic recovery and payload scanning
//! - [`routes`]: HTTP API endpoint handlers
//! - [`scanner`]: Recursive payload scanner
//! - [`state`]: Shared application state
//! - [`store`]: In-memory user record store
//! - [`types`]: Data transfer objects

pub mod app;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod scanner;
pub mod state;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
