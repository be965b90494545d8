use axum::routing::get;
use axum::Router;

use crate::handlers::version;
use crate::state::AppState;

/// `GET /version`, unauthenticated.
pub fn router() -> Router<AppState> {
    Router::new().route("/version", get(version::get_version))
}
