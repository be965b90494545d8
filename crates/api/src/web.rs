//! Per-request values shared between middleware and handlers.
//!
//! [`attach_values`] runs outermost and stores a [`RequestValues`] in the
//! request extensions. Everything further in reads it with the
//! [`RequestValues`] extractor or through `Request::extensions`.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;

/// Response header echoing the trace id.
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Trace id, arrival time and final status of one request.
///
/// Clones share the status slot, so a status recorded by an inner middleware
/// is visible to an outer one.
#[derive(Debug, Clone)]
pub struct RequestValues {
    pub trace_id: Uuid,
    pub now: DateTime<Utc>,
    status_code: Arc<AtomicU16>,
}

impl RequestValues {
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            now: Utc::now(),
            status_code: Arc::new(AtomicU16::new(0)),
        }
    }

    /// The recorded response status, or 0 if none has been recorded yet.
    pub fn status_code(&self) -> u16 {
        self.status_code.load(Ordering::Relaxed)
    }

    pub fn set_status_code(&self, status: u16) {
        self.status_code.store(status, Ordering::Relaxed);
    }
}

impl Default for RequestValues {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestValues {
    type Rejection = Infallible;

    /// Requests that bypassed [`attach_values`] get fresh values.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestValues>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Decode a JSON request body. The `Content-Type` header is not consulted.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// Outermost middleware: create the request's values and echo the trace id
/// in the response.
pub async fn attach_values(mut request: Request, next: Next) -> Response {
    let values = RequestValues::new();
    let trace_id = values.trace_id;
    request.extensions_mut().insert(values);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}
