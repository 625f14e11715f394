use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Body,
    http::Response,
    response::IntoResponse,
};
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::middleware::security_headers::apply_security_headers;

/// Turns a handler panic into the standard 500 JSON error.
#[derive(Clone)]
pub struct PanicResponder {
    config: Arc<AppConfig>,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Self::ResponseBody> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic payload".to_string()
        };
        tracing::error!(panic = %detail, "request handler panicked");

        let mut res = AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response();
        apply_security_headers(res.headers_mut(), &self.config.security);
        res
    }
}

/// Panic recovery layer for the request pipeline.
pub fn catch_panic_layer(config: Arc<AppConfig>) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder { config })
}
