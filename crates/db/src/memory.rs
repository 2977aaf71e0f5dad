use std::collections::HashSet;

use toll_core::{
    TimeWindow, TollEvent, TripRecord, VehicleRecord, VehicleTollCost, toll_totals_by_vehicle,
};

use crate::error::Result;
use crate::store::ReportStore;

/// Immutable in-memory store; natural order is the order records were added.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    trips: Vec<TripRecord>,
    tolls: Vec<TollEvent>,
    vehicles: Vec<VehicleRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(mut self, trips: impl IntoIterator<Item = TripRecord>) -> Self {
        self.trips.extend(trips);
        self
    }

    pub fn with_tolls(mut self, tolls: impl IntoIterator<Item = TollEvent>) -> Self {
        self.tolls.extend(tolls);
        self
    }

    pub fn with_vehicles(mut self, vehicles: impl IntoIterator<Item = VehicleRecord>) -> Self {
        self.vehicles.extend(vehicles);
        self
    }

    fn matching_tolls<'a>(
        &'a self,
        user_id: &'a str,
        window: &'a TimeWindow,
    ) -> impl Iterator<Item = &'a TollEvent> + 'a {
        self.tolls
            .iter()
            .filter(move |toll| toll.user_id == user_id && window.contains(toll.entry_time))
    }
}

impl ReportStore for MemoryStore {
    fn trips_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TripRecord>> {
        Ok(self
            .trips
            .iter()
            .filter(|trip| trip.user_id == user_id && window.covers(trip.start_time, trip.end_time))
            .cloned()
            .collect())
    }

    fn tolls_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TollEvent>> {
        Ok(self.matching_tolls(user_id, window).cloned().collect())
    }

    fn toll_totals_by_vehicle(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<VehicleTollCost>> {
        Ok(toll_totals_by_vehicle(self.matching_tolls(user_id, window)))
    }

    fn vehicles_by_id(&self, vehicle_ids: &[String]) -> Result<Vec<VehicleRecord>> {
        let wanted: HashSet<&str> = vehicle_ids.iter().map(String::as_str).collect();
        Ok(self
            .vehicles
            .iter()
            .filter(|vehicle| wanted.contains(vehicle.vehicle_id.as_str()))
            .cloned()
            .collect())
    }
}
