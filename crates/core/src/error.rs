/// Boxed error used to carry backend failures through the domain layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Returned by every [`Storer`](crate::store::Storer) when a todo does not exist.
    #[error("todo not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{operation}")]
    Storage {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl CoreError {
    /// Wrap a backend error with the operation that produced it.
    pub fn storage(operation: &'static str, source: impl Into<BoxError>) -> Self {
        CoreError::Storage {
            operation,
            source: source.into(),
        }
    }

    /// Prefix a validation message with `context`; other variants pass through.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            CoreError::Validation(msg) => CoreError::Validation(format!("{context}: {msg}")),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound)
    }
}
