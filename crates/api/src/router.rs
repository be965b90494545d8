//! Shared application router builder.
//!
//! Provides [`build_app_router`] so both the production binary (`main.rs`)
//! and integration tests use the exact same middleware stack.

use std::time::Duration;

use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use crate::middleware::auth::BearerToken;
use crate::middleware::{errors, logger, panics};
use crate::routes;
use crate::state::AppState;
use crate::web;

/// Build the full application [`Router`] with all middleware layers.
pub fn build_app_router(state: AppState) -> Router {
    let token = BearerToken::new(state.config.auth_token.as_str());
    let request_timeout = state.config.request_timeout();

    let app = Router::new()
        .nest("/api/v1", routes::api_routes(token))
        .with_state(state);

    with_middleware(app, request_timeout)
}

/// Wrap `router` in the application middleware stack.
///
/// Layers are applied bottom-up, so requests pass through them in this order:
///
/// 1. Attach per-request values (trace id, start time)
/// 2. Access log
/// 3. Error translation
/// 4. Request timeout
/// 5. Panic recovery
///
/// Route-level middleware such as bearer auth sits inside all of these.
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(CatchPanicLayer::custom(panics::recover))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(from_fn(errors::translate_errors))
        .layer(from_fn(logger::log_request))
        .layer(from_fn(web::attach_values))
}
