//! Access logging.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::web::RequestValues;

/// Emit one `request completed` event per request after the inner stack returns.
///
/// The status comes from the request values when an inner middleware recorded
/// one, otherwise from the response itself.
pub async fn log_request(request: Request, next: Next) -> Response {
    let values = request
        .extensions()
        .get::<RequestValues>()
        .cloned()
        .unwrap_or_default();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let remote_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".into());

    let response = next.run(request).await;

    let status_code = match values.status_code() {
        0 => response.status().as_u16(),
        recorded => recorded,
    };
    let duration = (Utc::now() - values.now).to_std().unwrap_or_default();

    tracing::info!(
        trace_id = %values.trace_id,
        %method,
        %path,
        %remote_address,
        status_code,
        ?duration,
        "request completed",
    );

    response
}
