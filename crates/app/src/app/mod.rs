use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use toll_db::SqliteStore;

use crate::config::JoinStrategy;
use crate::error::{AppError, Result};
use crate::services::{AppServices, SharedStore};

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings the report services run with.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub join_strategy: JoinStrategy,
    /// Upper bound callers put on a single report request.
    pub store_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            join_strategy: JoinStrategy::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Application state shared by every transport.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        let services = AppServices::new(&config, store);
        Self { config, services }
    }
}

/// Opens the SQLite store used by the running service.
pub fn open_sqlite_store(path: &Path) -> Result<Arc<SqliteStore>> {
    SqliteStore::open(path)
        .map(Arc::new)
        .map_err(|err| AppError::store(format!("open store at {}", path.display()), err))
}

/// Closes the store once every other handle has been dropped.
///
/// Returns `false` when handles are still alive; the connection then closes
/// when the last of them drops.
pub fn close_sqlite_store(store: Arc<SqliteStore>) -> Result<bool> {
    match Arc::try_unwrap(store) {
        Ok(store) => {
            store
                .close()
                .map_err(|err| AppError::store("close store", err))?;
            Ok(true)
        }
        Err(store) => {
            tracing::warn!(
                handles = Arc::strong_count(&store),
                "store still referenced at shutdown; leaving it to drop"
            );
            Ok(false)
        }
    }
}
