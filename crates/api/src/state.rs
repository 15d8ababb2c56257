use std::sync::Arc;

use devreg_core::validation::catalog::RuleCatalog;

use crate::config::ServerConfig;
use crate::store::DeviceStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Validation rules, loaded once at startup and never mutated.
    pub catalog: Arc<RuleCatalog>,
    /// Device storage used by the device handlers.
    pub devices: Arc<DeviceStore>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalog: RuleCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            devices: Arc::new(DeviceStore::new()),
        }
    }
}
