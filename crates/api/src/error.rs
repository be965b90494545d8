use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use todo_core::error::CoreError;

use crate::response::ErrorResponse;

/// Message sent to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-level error type for HTTP handlers and middleware.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"error": ...}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error carrying the exact status and message to report to the client.
    #[error("{message}")]
    Request { status: StatusCode, message: String },

    /// The request body was not valid JSON for the expected shape.
    #[error("unable to decode payload")]
    Decode(#[from] serde_json::Error),

    /// A handler panicked; holds the panic payload and backtrace.
    #[error("{0}")]
    Panic(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn request(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Request {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Core(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Core(CoreError::Storage { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Request { status, .. } => *status,
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message safe to show a client. Server errors never expose detail.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            AppError::Decode(err) => format!("unable to decode payload: {err}"),
            other => other.to_string(),
        }
    }

    /// The full error chain, `outer: inner: ...`, for logs.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            report.push_str(": ");
            report.push_str(&err.to_string());
            source = err.source();
        }
        report
    }
}

/// Attached to error responses so the error middleware can log the detail the
/// client does not see.
#[derive(Debug, Clone)]
pub struct ErrorReport(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport(self.report()));
        response
    }
}
