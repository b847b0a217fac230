//! Request logging

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error, warn};

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if status.is_server_error() {
        error!(target: "http", %method, %path, status = status.as_u16(), duration_ms, "request failed");
    } else if status.is_client_error() {
        warn!(target: "http", %method, %path, status = status.as_u16(), duration_ms, "request rejected");
    } else {
        debug!(target: "http", %method, %path, status = status.as_u16(), duration_ms, "request");
    }

    response
}
