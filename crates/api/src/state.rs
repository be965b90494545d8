use std::sync::Arc;

use todo_core::Core;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Todo service over whichever store was chosen at startup.
    pub core: Core,
    /// Server configuration (auth token, reported version).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(core: Core, config: ServerConfig) -> Self {
        Self {
            core,
            config: Arc::new(config),
        }
    }
}
