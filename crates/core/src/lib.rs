use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive time window used by every report query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Whether a span `[start, end]` lies fully inside the window.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= start && end <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    pub user_id: String,
    pub marketplace: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub vehicle_id: String,
}

impl TripRecord {
    pub fn span(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollEvent {
    pub id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub geofence_id_start: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geofence_id_end: Option<i64>,
    pub name_start: String,
    pub road_start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_system_type: Option<String>,
    pub entry_lat: f64,
    pub entry_lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_and_cash_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub express_lane_cost: Option<f64>,
    #[serde(default)]
    pub is_express_lane: bool,
    pub entry_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub toll_agency_name: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub toll_agency_abbr: Vec<String>,
    pub job_id: String,
}

impl TollEvent {
    /// Cost counted towards vehicle totals; a missing value counts as zero.
    pub fn billable_cost(&self) -> f64 {
        self.tag_and_cash_cost.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle_id: String,
    pub vin: String,
    pub name: String,
    pub model: String,
    pub make: String,
}

/// Vehicle metadata attached to an aggregate row when a record was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vin: String,
    pub name: String,
    pub model: String,
    pub make: String,
}

impl From<VehicleRecord> for VehicleInfo {
    fn from(record: VehicleRecord) -> Self {
        Self {
            vin: record.vin,
            name: record.name,
            model: record.model,
            make: record.make,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTollCost {
    pub vehicle_id: String,
    pub toll_cost: f64,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripWithTolls {
    #[serde(flatten)]
    pub trip: TripRecord,
    pub tolls: Vec<TollEvent>,
}

/// Groups toll events by vehicle and sums their billable cost.
///
/// Rows come back ordered by vehicle id so repeated calls over the same
/// input produce the same sequence.
pub fn toll_totals_by_vehicle<'a, I>(tolls: I) -> Vec<VehicleTollCost>
where
    I: IntoIterator<Item = &'a TollEvent>,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for toll in tolls {
        *totals.entry(toll.vehicle_id.as_str()).or_insert(0.0) += toll.billable_cost();
    }
    totals
        .into_iter()
        .map(|(vehicle_id, toll_cost)| VehicleTollCost {
            vehicle_id: vehicle_id.to_string(),
            toll_cost,
            vehicle: None,
        })
        .collect()
}

/// Left-outer join of aggregate rows against vehicle records by id.
pub fn attach_vehicles(
    totals: Vec<VehicleTollCost>,
    vehicles: Vec<VehicleRecord>,
) -> Vec<VehicleTollCost> {
    let mut by_id: HashMap<String, VehicleRecord> = vehicles
        .into_iter()
        .map(|vehicle| (vehicle.vehicle_id.clone(), vehicle))
        .collect();
    totals
        .into_iter()
        .map(|mut row| {
            row.vehicle = by_id.remove(&row.vehicle_id).map(VehicleInfo::from);
            row
        })
        .collect()
}

/// Attaches to each trip every toll of the same user whose entry time falls
/// inside the trip span. A toll can land on several overlapping trips.
///
/// Trip order is preserved, and tolls keep their input order within a trip.
pub fn partition_tolls_by_trip(trips: Vec<TripRecord>, tolls: &[TollEvent]) -> Vec<TripWithTolls> {
    let mut by_entry: Vec<usize> = (0..tolls.len()).collect();
    by_entry.sort_by_key(|&index| tolls[index].entry_time);

    trips
        .into_iter()
        .map(|trip| {
            let lo = by_entry.partition_point(|&index| tolls[index].entry_time < trip.start_time);
            let hi = by_entry.partition_point(|&index| tolls[index].entry_time <= trip.end_time);
            let mut hits: Vec<usize> = by_entry
                .get(lo..hi)
                .unwrap_or(&[])
                .iter()
                .copied()
                .filter(|&index| tolls[index].user_id == trip.user_id)
                .collect();
            hits.sort_unstable();
            TripWithTolls {
                tolls: hits.into_iter().map(|index| tolls[index].clone()).collect(),
                trip,
            }
        })
        .collect()
}

/// Smallest window covering every trip span, or `None` without trips.
pub fn trips_span(trips: &[TripRecord]) -> Option<TimeWindow> {
    let start = trips.iter().map(|trip| trip.start_time).min()?;
    let end = trips.iter().map(|trip| trip.end_time).max()?;
    Some(TimeWindow::new(start, end))
}
