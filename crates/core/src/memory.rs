//! In-memory [`Storer`] backed by an ordered `Vec` behind a reader/writer lock.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::filter::{TodoFilter, PAGE_SIZE};
use crate::store::Storer;
use crate::todo::Todo;
use crate::types::TodoId;

/// Keeps todos in insertion order. Reads take the shared lock, writes the
/// exclusive one. Every read hands out owned copies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored todos.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl Storer for MemoryStore {
    async fn query(&self, filters: &[TodoFilter]) -> Result<Vec<Todo>, CoreError> {
        let data = self.data.read().await;
        Ok(data
            .iter()
            .filter(|todo| TodoFilter::all_match(filters, todo))
            .take(PAGE_SIZE)
            .cloned()
            .collect())
    }

    async fn query_by_id(&self, id: TodoId) -> Result<Todo, CoreError> {
        self.data
            .read()
            .await
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(CoreError::NotFound)
    }

    async fn create(&self, todo: &Todo) -> Result<(), CoreError> {
        self.data.write().await.push(todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), CoreError> {
        let mut data = self.data.write().await;
        if let Some(stored) = data.iter_mut().find(|t| t.id == todo.id) {
            stored.text.clone_from(&todo.text);
            stored.priority = todo.priority;
            stored.completed = todo.completed;
            stored.time_updated = todo.time_updated;
        }
        Ok(())
    }

    async fn delete(&self, todo: &Todo) -> Result<(), CoreError> {
        let mut data = self.data.write().await;
        if let Some(pos) = data.iter().position(|t| t.id == todo.id) {
            data.remove(pos);
        }
        Ok(())
    }
}
