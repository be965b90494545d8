pub mod todo;
pub mod version;

use axum::Router;

use crate::middleware::auth::BearerToken;
use crate::state::AppState;

/// Build all routes mounted under `/api/v1`.
///
/// `/todos` requires the bearer token; `/version` is open.
pub fn api_routes(token: BearerToken) -> Router<AppState> {
    Router::new()
        .merge(todo::router(token))
        .merge(version::router())
}
