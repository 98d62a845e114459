//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

/// Logs request method, path, status, and duration.
///
/// Public share paths are logged without the token segment.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = redact_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}

const SHARE_PREFIX: &str = "/api/profile/share/";

fn redact_path(path: &str) -> String {
    match path.strip_prefix(SHARE_PREFIX) {
        Some(_) => format!("{SHARE_PREFIX}<token>"),
        None => path.to_string(),
    }
}
