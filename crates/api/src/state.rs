use std::sync::Arc;

use menuboard_core::sync::LiveDataSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: menuboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where sync checks read the current catalog from.
    pub live_data: Arc<dyn LiveDataSource>,
}

impl AppState {
    /// State backed by `pool` for both storage and live data.
    pub fn new(pool: menuboard_db::DbPool, config: ServerConfig) -> Self {
        let live_data = Arc::new(menuboard_db::repositories::LiveDataRepo::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            live_data,
        }
    }
}
