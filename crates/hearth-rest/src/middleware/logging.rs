//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Logs each request with its method, path, status, and latency.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    info!(
        target: "http",
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    response
}
