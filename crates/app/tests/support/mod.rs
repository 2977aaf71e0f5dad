#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use toll_app::{AppConfig, AppState, JoinStrategy, ReportScope};
use toll_core::{
    TimeWindow, TollEvent, TripRecord, VehicleRecord, VehicleTollCost,
};
use toll_db::{DbError, MemoryStore, ReportStore};

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn scope(user_id: &str, start: &str, end: &str) -> ReportScope {
    ReportScope {
        user_id: user_id.to_string(),
        window: TimeWindow::new(ts(start), ts(end)),
    }
}

pub fn make_trip(id: &str, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        marketplace: "us-east".to_string(),
        start_time: start,
        end_time: end,
        vehicle_id: "V1".to_string(),
    }
}

pub fn make_toll(
    id: &str,
    user_id: &str,
    vehicle_id: &str,
    entry_time: DateTime<Utc>,
    tag_and_cash_cost: Option<f64>,
) -> TollEvent {
    TollEvent {
        id: id.to_string(),
        user_id: user_id.to_string(),
        vehicle_id: vehicle_id.to_string(),
        geofence_id_start: 7,
        geofence_id_end: None,
        name_start: "Plaza".to_string(),
        road_start: "SR-91".to_string(),
        name_end: None,
        road_end: None,
        toll_system_type: Some("open".to_string()),
        entry_lat: 33.87,
        entry_lng: -117.6,
        exit_lat: None,
        exit_lng: None,
        tag_cost: None,
        cash_cost: None,
        license_plate_cost: None,
        tag_and_cash_cost,
        express_lane_cost: None,
        is_express_lane: false,
        entry_time,
        exit_time: None,
        currency: Some("USD".to_string()),
        toll_agency_name: vec!["OCTA".to_string()],
        toll_agency_abbr: vec!["OCTA".to_string()],
        job_id: "job-7".to_string(),
    }
}

/// The two-toll single-trip example used throughout the report docs.
pub fn scenario_store() -> MemoryStore {
    MemoryStore::new()
        .with_trips([make_trip(
            "trip-1",
            "U1",
            ts("2024-04-09T06:00:00Z"),
            ts("2024-04-09T08:00:00Z"),
        )])
        .with_tolls([
            make_toll("toll-1", "U1", "V1", ts("2024-04-09T07:00:00Z"), Some(3.5)),
            make_toll("toll-2", "U1", "V1", ts("2024-04-09T07:30:00Z"), Some(2.0)),
        ])
}

pub fn app_with(store: Arc<dyn ReportStore>, join_strategy: JoinStrategy) -> AppState {
    let config = AppConfig {
        join_strategy,
        ..AppConfig::default()
    };
    AppState::new(config, store)
}

/// Wraps a store, counting queries and failing on a chosen toll query.
pub struct ProbeStore {
    inner: MemoryStore,
    pub trip_queries: AtomicUsize,
    pub toll_queries: AtomicUsize,
    pub total_queries: AtomicUsize,
    pub vehicle_queries: AtomicUsize,
    fail_trips: bool,
    fail_toll_query: Option<usize>,
}

impl ProbeStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            trip_queries: AtomicUsize::new(0),
            toll_queries: AtomicUsize::new(0),
            total_queries: AtomicUsize::new(0),
            vehicle_queries: AtomicUsize::new(0),
            fail_trips: false,
            fail_toll_query: None,
        }
    }

    pub fn failing_trips(mut self) -> Self {
        self.fail_trips = true;
        self
    }

    /// Fails the toll query with the given zero-based index.
    pub fn failing_toll_query(mut self, index: usize) -> Self {
        self.fail_toll_query = Some(index);
        self
    }

    pub fn queries(&self) -> usize {
        self.trip_queries.load(Ordering::SeqCst)
            + self.toll_queries.load(Ordering::SeqCst)
            + self.total_queries.load(Ordering::SeqCst)
            + self.vehicle_queries.load(Ordering::SeqCst)
    }
}

impl ReportStore for ProbeStore {
    fn trips_in_window(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> toll_db::Result<Vec<TripRecord>> {
        self.trip_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_trips {
            return Err(DbError::Unavailable("connection reset".to_string()));
        }
        self.inner.trips_in_window(user_id, window)
    }

    fn tolls_in_window(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> toll_db::Result<Vec<TollEvent>> {
        let index = self.toll_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_toll_query == Some(index) {
            return Err(DbError::Unavailable("connection reset".to_string()));
        }
        self.inner.tolls_in_window(user_id, window)
    }

    fn toll_totals_by_vehicle(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> toll_db::Result<Vec<VehicleTollCost>> {
        self.total_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.toll_totals_by_vehicle(user_id, window)
    }

    fn vehicles_by_id(&self, vehicle_ids: &[String]) -> toll_db::Result<Vec<VehicleRecord>> {
        self.vehicle_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.vehicles_by_id(vehicle_ids)
    }
}
