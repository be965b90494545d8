//! Repository for the `todos` table.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use todo_core::error::CoreError;
use todo_core::filter::{TodoFilter, PAGE_SIZE};
use todo_core::store::Storer;
use todo_core::todo::Todo;
use todo_core::types::TodoId;

use crate::models::todo::TodoRow;
use crate::DbPool;

/// Column list for `todos` queries.
const TODO_COLUMNS: &str = "id, text, priority, completed, time_created, time_updated";

/// SQL-backed todo store.
#[derive(Debug, Clone)]
pub struct TodoRepo {
    pool: DbPool,
}

impl TodoRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Build the list query: one bound predicate per filter, joined by `AND`.
    fn list_query(filters: &[TodoFilter]) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos"));

        for (i, filter) in filters.iter().enumerate() {
            query.push(if i == 0 { " WHERE " } else { " AND " });
            match *filter {
                TodoFilter::Completed(completed) => {
                    query.push("completed = ").push_bind(completed);
                }
                TodoFilter::Priority(priority) => {
                    query.push("priority = ").push_bind(priority.as_str());
                }
            }
        }

        query.push(" ORDER BY id LIMIT ").push_bind(PAGE_SIZE as i64);
        query
    }
}

#[async_trait]
impl Storer for TodoRepo {
    async fn query(&self, filters: &[TodoFilter]) -> Result<Vec<Todo>, CoreError> {
        let rows = Self::list_query(filters)
            .build_query_as::<TodoRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => CoreError::NotFound,
                other => CoreError::storage("querying todos", other),
            })?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn query_by_id(&self, id: TodoId) -> Result<Todo, CoreError> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 LIMIT 1");
        let row = sqlx::query_as::<_, TodoRow>(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CoreError::storage("querying todo", e))?
            .ok_or(CoreError::NotFound)?;

        row.try_into()
    }

    async fn create(&self, todo: &Todo) -> Result<(), CoreError> {
        let row = TodoRow::from(todo);
        sqlx::query(
            "INSERT INTO todos (id, text, priority, completed, time_created, time_updated) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&row.id)
        .bind(&row.text)
        .bind(&row.priority)
        .bind(row.completed)
        .bind(row.time_created)
        .bind(row.time_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| CoreError::storage("inserting todo", e))?;

        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), CoreError> {
        let row = TodoRow::from(todo);
        sqlx::query(
            "UPDATE todos SET text = $1, priority = $2, completed = $3, time_updated = $4 \
             WHERE id = $5",
        )
        .bind(&row.text)
        .bind(&row.priority)
        .bind(row.completed)
        .bind(row.time_updated)
        .bind(&row.id)
        .execute(&self.pool)
        .await
        .map_err(|e| CoreError::storage("updating todo", e))?;

        Ok(())
    }

    async fn delete(&self, todo: &Todo) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::storage("deleting todo", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use todo_core::todo::Priority;

    use super::*;

    #[test]
    fn list_query_without_filters_has_no_where_clause() {
        let query = TodoRepo::list_query(&[]);
        assert_eq!(
            query.sql(),
            "SELECT id, text, priority, completed, time_created, time_updated FROM todos \
             ORDER BY id LIMIT $1"
        );
    }

    #[test]
    fn list_query_binds_every_filter() {
        let query = TodoRepo::list_query(&[
            TodoFilter::Completed(true),
            TodoFilter::Priority(Priority::High),
        ]);
        assert_eq!(
            query.sql(),
            "SELECT id, text, priority, completed, time_created, time_updated FROM todos \
             WHERE completed = $1 AND priority = $2 ORDER BY id LIMIT $3"
        );
    }
}
