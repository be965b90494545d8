pub mod todo;
pub mod version;
