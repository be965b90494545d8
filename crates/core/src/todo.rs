//! The todo entity and the option records clients send to create or modify one.
//!
//! Option records carry priority as raw text so that an unknown value is
//! reported as a validation failure by this module rather than as a decode
//! failure at the transport boundary. Validation turns an option record into a
//! typed value ([`Priority`] or [`TodoChanges`]) that the service applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::Field;
use crate::types::{Timestamp, TodoId};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub priority: Priority,
    pub completed: bool,
    pub time_created: Timestamp,
    pub time_updated: Timestamp,
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Every priority, in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Canonical lowercase name, as stored and sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// `[low, medium, high]`, used in error messages.
    pub fn allowed_values() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    /// Only the exact lowercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "invalid priority {s:?}: must be one of {}",
                    Self::allowed_values()
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Create options
// ---------------------------------------------------------------------------

/// What a client must supply to create a todo.
///
/// Missing keys decode as empty strings and are rejected by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoCreateOptions {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub priority: String,
}

impl TodoCreateOptions {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority: priority.as_str().to_string(),
        }
    }

    /// Check required fields and return the parsed priority.
    pub fn validate(&self) -> Result<Priority, CoreError> {
        if self.text.is_empty() {
            return Err(missing("text"));
        }
        if self.priority.is_empty() {
            return Err(missing("priority"));
        }
        self.priority.parse()
    }
}

// ---------------------------------------------------------------------------
// Update options
// ---------------------------------------------------------------------------

/// The attributes a client may change on an existing todo.
///
/// An absent field leaves the stored value alone. A field sent as `null` or,
/// for strings, as `""` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdateOptions {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub text: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub priority: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub completed: Field<bool>,
}

impl TodoUpdateOptions {
    /// Check every provided field and return the typed set of changes.
    pub fn validate(&self) -> Result<TodoChanges, CoreError> {
        let text = match &self.text {
            Field::Absent => None,
            Field::Null => return Err(missing("text")),
            Field::Present(text) if text.is_empty() => return Err(missing("text")),
            Field::Present(text) => Some(text.clone()),
        };

        let priority = match &self.priority {
            Field::Absent => None,
            Field::Null => return Err(missing("priority")),
            Field::Present(p) if p.is_empty() => return Err(missing("priority")),
            Field::Present(p) => Some(p.parse()?),
        };

        let completed = match self.completed {
            Field::Absent => None,
            Field::Null => return Err(missing("completed")),
            Field::Present(completed) => Some(completed),
        };

        Ok(TodoChanges {
            text,
            priority,
            completed,
        })
    }
}

/// A validated subset of todo attributes to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// Overwrite the provided attributes on `todo`. Timestamps are left alone.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(text) = self.text {
            todo.text = text;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("missing required field {field}"))
}
