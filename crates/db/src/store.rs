use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use toll_core::{TimeWindow, TollEvent, TripRecord, VehicleRecord, VehicleTollCost};

use crate::Db;
use crate::error::{DbError, Result};

/// Read primitives the report services need from a record store.
///
/// Every method filters by user equality; the window bounds are inclusive.
pub trait ReportStore: Send + Sync {
    /// Trips whose own span lies inside `window`, in the store's natural order.
    fn trips_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TripRecord>>;

    /// Toll events whose entry time lies inside `window`, in the store's natural order.
    fn tolls_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TollEvent>>;

    /// Sum of `tag_and_cash_cost` per vehicle over the tolls `tolls_in_window`
    /// would return, ordered by vehicle id.
    fn toll_totals_by_vehicle(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<VehicleTollCost>>;

    /// Vehicle records for the given ids. Unknown ids are skipped.
    fn vehicles_by_id(&self, vehicle_ids: &[String]) -> Result<Vec<VehicleRecord>>;
}

/// SQLite-backed store sharing one connection across requests.
pub struct SqliteStore {
    db: Mutex<Db>,
}

impl SqliteStore {
    /// Opens the database, applies migrations and checks the connection.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut db = Db::open(path)?;
        db.migrate()?;
        db.ping()?;
        tracing::debug!(path = %path.display(), "opened sqlite store");
        Ok(Self::new(db))
    }

    pub fn new(db: Db) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Runs `f` with exclusive access to the underlying database.
    pub fn with_db<T>(&self, f: impl FnOnce(&mut Db) -> Result<T>) -> Result<T> {
        let mut db = self.lock()?;
        f(&mut db)
    }

    pub fn close(self) -> Result<()> {
        let db = self.db.into_inner().map_err(|_| poisoned())?;
        db.close()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Db>> {
        self.db.lock().map_err(|_| poisoned())
    }
}

fn poisoned() -> DbError {
    DbError::Unavailable("sqlite connection lock poisoned".to_string())
}

impl ReportStore for SqliteStore {
    fn trips_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TripRecord>> {
        self.lock()?.trips_in_window(user_id, window)
    }

    fn tolls_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TollEvent>> {
        self.lock()?.toll_events_in_window(user_id, window)
    }

    fn toll_totals_by_vehicle(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<VehicleTollCost>> {
        self.lock()?.toll_totals_by_vehicle(user_id, window)
    }

    fn vehicles_by_id(&self, vehicle_ids: &[String]) -> Result<Vec<VehicleRecord>> {
        if vehicle_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.lock()?.vehicles_by_id(vehicle_ids)
    }
}
