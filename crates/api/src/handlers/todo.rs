//! Handlers for the `/todos` resource.
//!
//! Each handler decodes its inputs, calls the [`Core`](todo_core::Core)
//! service and encodes the result. All of them sit behind bearer
//! authentication.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use todo_core::error::CoreError;
use todo_core::todo::{TodoCreateOptions, TodoUpdateOptions};
use todo_core::types::TodoId;

use crate::error::{AppError, AppResult};
use crate::query::TodoQueryParams;
use crate::state::AppState;
use crate::web::{self, RequestValues};

/// GET /api/v1/todos
///
/// List up to one page of todos, optionally filtered by `completed` and `priority`.
pub async fn query_todos(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let filters = TodoQueryParams::from_pairs(pairs).into_filters()?;
    let todos = state.core.query(&filters).await?;

    Ok(Json(todos))
}

/// POST /api/v1/todos
pub async fn create_todo(
    values: RequestValues,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let opts: TodoCreateOptions = web::decode(&body)?;
    let todo = state.core.create(opts).await?;

    tracing::info!(trace_id = %values.trace_id, todo_id = %todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /api/v1/todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_todo_id(&id)?;
    let todo = state.core.query_by_id(id).await?;

    Ok(Json(todo))
}

/// PATCH /api/v1/todos/{id}
///
/// The todo is loaded before the body is looked at, so an unknown id is a
/// 404 whatever the payload.
pub async fn update_todo(
    values: RequestValues,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let id = parse_todo_id(&id)?;
    let current = state.core.query_by_id(id).await?;

    let opts: TodoUpdateOptions = web::decode(&body)?;
    let todo = state.core.update(current, opts).await?;

    tracing::info!(trace_id = %values.trace_id, todo_id = %todo.id, "Todo updated");

    Ok(Json(todo))
}

/// DELETE /api/v1/todos/{id}
///
/// Deleting a todo that does not exist is a success.
pub async fn delete_todo(
    values: RequestValues,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_todo_id(&id)?;

    let todo = match state.core.query_by_id(id).await {
        Ok(todo) => todo,
        Err(CoreError::NotFound) => return Ok(StatusCode::NO_CONTENT),
        Err(err) => return Err(err.into()),
    };
    state.core.delete(&todo).await?;

    tracing::info!(trace_id = %values.trace_id, todo_id = %todo.id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_todo_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::request(StatusCode::BAD_REQUEST, "invalid todo id"))
}
