use axum::{
    extract::Request,
    http::{header::HOST, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;

/// Rejects requests whose `Host` header is not in `DISCO_ALLOWED_HOSTS`.
pub async fn allowed_hosts_middleware(
    config: Arc<Config>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or("");

    if !config.is_host_allowed(host) {
        warn!(host = %host, "Rejected request for disallowed host");
        return (StatusCode::BAD_REQUEST, "Bad Request (400)").into_response();
    }

    next.run(request).await
}
