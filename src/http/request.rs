//! Request identification.
//!
//! Every request carries an `x-request-id`: the caller's if present,
//! otherwise a fresh UUID set by `SetRequestIdLayer`. The id is recorded on
//! the request span, so every log line emitted while handling the request
//! (including remote procedure failures) carries it.

use axum::{body::Body, http::Request};
use tracing::Span;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id of `request`, or `-` when none was assigned.
pub fn request_id(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

/// Span for one inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request),
    )
}
