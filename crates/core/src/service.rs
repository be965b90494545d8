//! The todo service: validation and timestamping in front of a [`Storer`].

use std::sync::Arc;

use crate::error::CoreError;
use crate::filter::TodoFilter;
use crate::store::Storer;
use crate::todo::{Todo, TodoCreateOptions, TodoUpdateOptions};
use crate::types::{now, TodoId};

/// Entry point for every todo operation.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Core {
    storer: Arc<dyn Storer>,
}

impl Core {
    pub fn new(storer: Arc<dyn Storer>) -> Self {
        Self { storer }
    }

    /// List todos matching every filter. No matches is an empty list.
    pub async fn query(&self, filters: &[TodoFilter]) -> Result<Vec<Todo>, CoreError> {
        self.storer.query(filters).await
    }

    /// Validate `opts` and store a new, incomplete todo.
    pub async fn create(&self, opts: TodoCreateOptions) -> Result<Todo, CoreError> {
        let priority = opts.validate().map_err(|e| e.with_context("validate"))?;

        let now = now();
        let todo = Todo {
            id: TodoId::new_v4(),
            text: opts.text,
            priority,
            completed: false,
            time_created: now,
            time_updated: now,
        };

        self.storer.create(&todo).await?;

        Ok(todo)
    }

    /// Fetch one todo. Yields [`CoreError::NotFound`] when it does not exist.
    pub async fn query_by_id(&self, id: TodoId) -> Result<Todo, CoreError> {
        self.storer.query_by_id(id).await
    }

    /// Apply the provided fields of `opts` to `current` and persist the result.
    ///
    /// `current` should come from a fresh [`query_by_id`](Self::query_by_id)
    /// so that a missing todo is reported before the update is attempted.
    pub async fn update(&self, current: Todo, opts: TodoUpdateOptions) -> Result<Todo, CoreError> {
        let changes = opts.validate().map_err(|e| e.with_context("validate"))?;

        let mut todo = current;
        changes.apply_to(&mut todo);
        // time_updated never moves backwards, even across clock adjustments.
        todo.time_updated = now().max(todo.time_updated);

        self.storer.update(&todo).await?;

        Ok(todo)
    }

    /// Remove a todo. Deleting one that is already gone succeeds.
    pub async fn delete(&self, todo: &Todo) -> Result<(), CoreError> {
        self.storer.delete(todo).await
    }
}
