//! Middleware components for HTTP request processing.
//!
//! Each module handles one cross-cutting concern of the request pipeline.
//! [`crate::app::build_app`] composes them in a fixed order around the routes.

pub mod payload_guard;
pub mod recovery;
pub mod security_headers;
