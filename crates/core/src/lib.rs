//! Todo domain layer.
//!
//! Holds the entity, its option records and validation, the [`Storer`]
//! capability with an in-memory implementation, and the [`Core`] service that
//! the HTTP layer and any other caller go through.

pub mod error;
pub mod field;
pub mod filter;
pub mod memory;
pub mod service;
pub mod store;
pub mod todo;
pub mod types;

pub use error::CoreError;
pub use service::Core;
pub use store::Storer;
