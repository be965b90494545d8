//! Error translation.
//!
//! Handler errors are already rendered by [`AppError`](crate::error::AppError)'s
//! `IntoResponse`. This middleware logs the detail attached to those
//! responses, gives bodyless error responses produced elsewhere in the stack
//! (unknown route, wrong method, timeout) the same `{"error": ...}` shape, and
//! records the final status in the request values.

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorReport;
use crate::response::ErrorResponse;
use crate::web::RequestValues;

pub async fn translate_errors(request: Request, next: Next) -> Response {
    let values = request
        .extensions()
        .get::<RequestValues>()
        .cloned()
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if let Some(ErrorReport(report)) = response.extensions().get::<ErrorReport>() {
        tracing::error!(trace_id = %values.trace_id, error = %report, "request error");
    } else if (status.is_client_error() || status.is_server_error()) && !is_json(&response) {
        let message = status.canonical_reason().unwrap_or("Unknown Error").to_string();
        tracing::debug!(trace_id = %values.trace_id, %status, "Rendering bodyless error response");
        let headers = std::mem::take(response.headers_mut());
        response = (status, Json(ErrorResponse { error: message })).into_response();
        for (name, value) in headers.iter() {
            if name != CONTENT_TYPE && !response.headers().contains_key(name) {
                response.headers_mut().insert(name.clone(), value.clone());
            }
        }
    }

    values.set_status_code(status.as_u16());
    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
