use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Logs one line per request. The query string is left out since it carries
/// user identifiers.
pub async fn trace_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, "request handled");
    }
    response
}
