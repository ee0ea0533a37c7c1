use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Request observability: every request runs inside a span carrying the
/// method, the matched route pattern and a request id, and logs its status
/// and latency on the way out.
pub async fn request_tracing_middleware(
    matched_path: MatchedPath,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let route = matched_path.as_str().to_string();
    let request_id = uuid::Uuid::new_v4();
    let start = Instant::now();

    let span = info_span!(
        "http_request",
        method = %method,
        route = %route,
        request_id = %request_id,
    );

    let response = next.run(request).instrument(span).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;

    if status >= 500 {
        error!(%method, %route, %request_id, status, latency_ms, "Request failed");
    } else {
        info!(%method, %route, %request_id, status, latency_ms, "Request completed");
    }

    response
}
