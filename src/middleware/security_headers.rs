//! Security headers middleware for HTTP responses.
//!
//! Adds the browser-side hardening headers to every response and marks JSON
//! responses as non-cacheable.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::config::{AppConfig, SecurityConfig};

/// Adds standard security-related HTTP headers to all responses.
///
/// # Security Headers Applied
///
/// - `X-XSS-Protection` (default `1; mode=block`)
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options` (default `DENY`)
/// - `Content-Security-Policy` (default `default-src 'self'`)
/// - Optional: `Strict-Transport-Security` (HSTS) via configuration
///
/// JSON responses additionally get `Cache-Control: no-store`.
pub async fn security_headers_middleware(
    State(cfg): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let mut res = next.run(req).await;
    apply_security_headers(res.headers_mut(), &cfg.security);
    res
}

/// Writes the configured security headers into `headers`.
///
/// Shared with the panic handler so recovered 500s carry the same headers.
pub fn apply_security_headers(headers: &mut HeaderMap, sec: &SecurityConfig) {
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_str(&sec.xss_protection).unwrap_or(HeaderValue::from_static("1; mode=block")),
    );

    headers.insert(HeaderName::from_static("x-content-type-options"), HeaderValue::from_static("nosniff"));

    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_str(&sec.frame_options).unwrap_or(HeaderValue::from_static("DENY")),
    );

    if let Some(csp) = &sec.csp {
        if !csp.trim().is_empty() {
            if let Ok(val) = HeaderValue::from_str(csp) {
                headers.insert(HeaderName::from_static("content-security-policy"), val);
            }
        }
    }

    if sec.enable_hsts.unwrap_or(false) {
        let max_age = sec.hsts_max_age.unwrap_or(31536000); // 1 year
        let include_sub = if sec.hsts_include_subdomains.unwrap_or(false) { "; includeSubDomains" } else { "" };
        let value = format!("max-age={}{}", max_age, include_sub);
        headers.insert(
            HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_str(&value).unwrap_or(HeaderValue::from_static("max-age=31536000")),
        );
    }

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|s| s.starts_with("application/json"))
        .unwrap_or(false);
    if is_json {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    }
}
