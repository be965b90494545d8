//! Shared-secret bearer authentication.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;

/// The token every request must present as `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerToken(Arc<str>);

impl BearerToken {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    /// Check the `Authorization` header.
    ///
    /// The header must split on whitespace into exactly two fields: a scheme
    /// equal to `bearer` in any case, and a token equal to ours byte for byte.
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let fields: Vec<&str> = header.split_whitespace().collect();

        let [scheme, token] = fields.as_slice() else {
            return Err(malformed());
        };
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(malformed());
        }
        if token.as_bytes() != self.0.as_bytes() {
            return Err(AppError::request(
                StatusCode::UNAUTHORIZED,
                StatusCode::UNAUTHORIZED
                    .canonical_reason()
                    .unwrap_or("Unauthorized"),
            ));
        }

        Ok(())
    }
}

fn malformed() -> AppError {
    AppError::request(StatusCode::UNAUTHORIZED, "malformed authorization header")
}

/// Route middleware rejecting requests without the expected bearer token.
pub async fn require_bearer(
    State(token): State<BearerToken>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    token.verify(request.headers())?;
    Ok(next.run(request).await)
}
