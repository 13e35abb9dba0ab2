//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `rpc_calls_total` (counter): remote procedure calls by procedure, outcome
//! - `rpc_call_duration_seconds` (histogram): remote call latency
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so tests never need to set anything up.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record a completed remote procedure call.
pub fn record_rpc(procedure: &str, outcome: &'static str, start: Instant) {
    let labels = [
        ("procedure", procedure.to_string()),
        ("outcome", outcome.to_string()),
    ];
    metrics::counter!("rpc_calls_total", &labels).increment(1);
    metrics::histogram!("rpc_call_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Middleware recording request count and latency per matched route.
///
/// Unmatched requests are labelled `unmatched` to keep cardinality bounded.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &route, response.status().as_u16(), start);
    response
}
