//! Query parameters accepted by `GET /api/v1/todos`.

use todo_core::error::CoreError;
use todo_core::filter::TodoFilter;
use todo_core::todo::Priority;

/// `?completed=&priority=`. Any other parameter is ignored; empty values are
/// treated as absent.
#[derive(Debug, Default)]
pub struct TodoQueryParams {
    pub completed: Option<String>,
    pub priority: Option<String>,
}

impl TodoQueryParams {
    /// Build from raw query pairs. When a key repeats, its first value wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "completed" => &mut params.completed,
                "priority" => &mut params.priority,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Convert the whitelisted parameters into typed filters.
    pub fn into_filters(self) -> Result<Vec<TodoFilter>, CoreError> {
        let mut filters = Vec::new();

        if let Some(completed) = self.completed.filter(|v| !v.is_empty()) {
            let value = parse_bool(&completed).ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid query parameter completed={completed}: must be one of [true, false]"
                ))
            })?;
            filters.push(TodoFilter::Completed(value));
        }

        if let Some(priority) = self.priority.filter(|v| !v.is_empty()) {
            let value: Priority = priority.parse().map_err(|_| {
                CoreError::Validation(format!(
                    "invalid query parameter priority={priority}: must be one of {}",
                    Priority::allowed_values()
                ))
            })?;
            filters.push(TodoFilter::Priority(value));
        }

        Ok(filters)
    }
}

/// Strict boolean parsing: `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
