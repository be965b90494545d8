//! Typed predicates for listing todos.
//!
//! Stores receive a slice of filters that must all hold. The SQL store renders
//! each one as a bound parameter; the in-memory store evaluates
//! [`TodoFilter::matches`] directly.

use crate::todo::{Priority, Todo};

/// Maximum number of todos returned by a single query.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoFilter {
    Completed(bool),
    Priority(Priority),
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match *self {
            TodoFilter::Completed(completed) => todo.completed == completed,
            TodoFilter::Priority(priority) => todo.priority == priority,
        }
    }

    /// Whether `todo` satisfies every filter. An empty slice matches everything.
    pub fn all_match(filters: &[TodoFilter], todo: &Todo) -> bool {
        filters.iter().all(|f| f.matches(todo))
    }

    /// The query-string pair this filter corresponds to, e.g. `("completed", "true")`.
    pub fn query_pair(&self) -> (&'static str, String) {
        match *self {
            TodoFilter::Completed(completed) => ("completed", completed.to_string()),
            TodoFilter::Priority(priority) => ("priority", priority.as_str().to_string()),
        }
    }
}
