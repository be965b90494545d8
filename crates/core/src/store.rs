//! The storage capability the todo service depends on.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::filter::TodoFilter;
use crate::todo::Todo;
use crate::types::TodoId;

/// Persistence operations for todos.
///
/// Implementations must return [`CoreError::NotFound`] from
/// [`query_by_id`](Storer::query_by_id) when no todo has the given id.
/// `update` and `delete` against a missing id are not errors.
///
/// Dropping a returned future abandons the operation at its next await point;
/// this is how request cancellation reaches the store.
#[async_trait]
pub trait Storer: Send + Sync + 'static {
    /// Up to [`PAGE_SIZE`](crate::filter::PAGE_SIZE) todos matching every filter.
    async fn query(&self, filters: &[TodoFilter]) -> Result<Vec<Todo>, CoreError>;

    async fn query_by_id(&self, id: TodoId) -> Result<Todo, CoreError>;

    async fn create(&self, todo: &Todo) -> Result<(), CoreError>;

    /// Overwrite text, priority, completed and `time_updated` of the todo with the same id.
    async fn update(&self, todo: &Todo) -> Result<(), CoreError>;

    async fn delete(&self, todo: &Todo) -> Result<(), CoreError>;
}
