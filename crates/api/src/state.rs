use std::sync::Arc;

use pickup_scheduler::{RequestService, ShiftAdminService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and services are handles over shared pools.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pickup_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rider request lifecycle.
    pub requests: RequestService,
    /// Shift, staff, driver and user administration.
    pub shifts: ShiftAdminService,
}

impl AppState {
    /// Wire the services over `pool`, applying the configured lock timeout.
    pub fn new(pool: pickup_db::DbPool, config: Arc<ServerConfig>) -> Self {
        let lock_timeout_ms = config.lock_timeout_ms;
        let requests = RequestService::new(pool.clone()).with_lock_timeout(lock_timeout_ms);
        let shifts = ShiftAdminService::new(pool.clone()).with_lock_timeout(lock_timeout_ms);
        Self {
            pool,
            config,
            requests,
            shifts,
        }
    }
}
