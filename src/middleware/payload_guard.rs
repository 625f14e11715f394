use axum::{
    body::Body,
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::scanner::{self, Verdict};
use crate::state::AppState;

/// Rejects POST and PUT requests whose JSON body the payload scanner flags.
///
/// The body is buffered up to `limits.max_body_bytes`, scanned, and then handed
/// to the next service unchanged. Flagged requests never reach the handler.
///
/// # Returns
///
/// * `Response` - The downstream response, `400 Bad Request` for a flagged
///   payload, or `413 Payload Too Large` when the body exceeds the limit.
pub async fn payload_guard_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !matches!(req.method(), &Method::POST | &Method::PUT) {
        return next.run(req).await;
    }

    let limit = state.config.limits.max_body_bytes;
    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let inner = e.into_inner();
            if inner.is::<http_body_util::LengthLimitError>() {
                tracing::warn!(limit, uri = %parts.uri, "request body exceeds limit");
                return AppError::PayloadTooLarge { limit }.into_response();
            }
            tracing::warn!(error = %inner, "failed to read request body");
            return AppError::BadRequest("Failed to read request body".into()).into_response();
        }
    };

    state.metrics.inc_payloads_scanned();
    let payload = scanner::parse_body(&bytes);
    if let Verdict::Malicious { path, .. } = scanner::scan_payload(&payload) {
        state.metrics.inc_payloads_rejected();
        tracing::warn!(method = %parts.method, uri = %parts.uri, path = %path, "rejecting flagged payload");
        return AppError::MaliciousPayload { path }.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
