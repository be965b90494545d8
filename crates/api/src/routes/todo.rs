//! Route definitions for the `/todos` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers::todo;
use crate::middleware::auth::{require_bearer, BearerToken};
use crate::state::AppState;

/// Todo routes, all behind bearer authentication.
///
/// ```text
/// GET    /todos        -> query_todos  (?completed=&priority=)
/// POST   /todos        -> create_todo
/// GET    /todos/{id}   -> get_todo
/// PATCH  /todos/{id}   -> update_todo
/// DELETE /todos/{id}   -> delete_todo
/// ```
pub fn router(token: BearerToken) -> Router<AppState> {
    Router::new()
        .route("/todos", get(todo::query_todos).post(todo::create_todo))
        .route(
            "/todos/{id}",
            get(todo::get_todo)
                .patch(todo::update_todo)
                .delete(todo::delete_todo),
        )
        .route_layer(from_fn_with_state(token, require_bearer))
}
