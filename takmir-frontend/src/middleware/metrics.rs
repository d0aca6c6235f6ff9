use crate::services::metrics::record_request;
use axum::extract::MatchedPath;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Counts requests and observes latency per route template, so that
/// `/api/drafts/:key` is one series regardless of the key.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    record_request(&method, &path, &status, start.elapsed());

    response
}
