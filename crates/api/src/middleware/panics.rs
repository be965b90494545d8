//! Panic recovery.
//!
//! Used as the handler of `tower_http`'s `CatchPanicLayer`, so a panicking
//! handler yields an [`AppError::Panic`] response that the error middleware
//! logs like any other internal error.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Turn a caught panic payload into a 500 response carrying the panic message
/// and a backtrace for the logs.
pub fn recover(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let trace = Backtrace::force_capture();
    AppError::Panic(format!("PANIC [{message}] TRACE[{trace}]")).into_response()
}
