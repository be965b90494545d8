//! Row model for the `todos` table.

use chrono::{Local, NaiveDateTime};
use sqlx::FromRow;
use todo_core::error::CoreError;
use todo_core::todo::{Priority, Todo};
use todo_core::types::TodoId;

/// A row from the `todos` table.
///
/// Ids are canonical lowercase UUID strings; timestamps are UTC without zone.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: String,
    pub text: String,
    pub priority: String,
    pub completed: bool,
    pub time_created: NaiveDateTime,
    pub time_updated: NaiveDateTime,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text.clone(),
            priority: todo.priority.as_str().to_string(),
            completed: todo.completed,
            time_created: todo.time_created.naive_utc(),
            time_updated: todo.time_updated.naive_utc(),
        }
    }
}

impl TryFrom<TodoRow> for Todo {
    type Error = CoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let id: TodoId = row
            .id
            .parse()
            .map_err(|e| CoreError::storage("decoding todo id", e))?;
        let priority: Priority = row
            .priority
            .parse()
            .map_err(|e| CoreError::storage("decoding todo priority", e))?;

        Ok(Todo {
            id,
            text: row.text,
            priority,
            completed: row.completed,
            time_created: row.time_created.and_utc().with_timezone(&Local),
            time_updated: row.time_updated.and_utc().with_timezone(&Local),
        })
    }
}
