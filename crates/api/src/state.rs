use std::sync::Arc;
use std::time::Duration;

use catalog_db::QueryContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A fresh store context bounded by the configured query timeout.
    pub fn query_ctx(&self) -> QueryContext {
        QueryContext::with_timeout(Duration::from_secs(self.config.query_timeout_secs))
    }
}
