#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use toll_core::{TollEvent, TripRecord, VehicleRecord};
use toll_db::Db;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("timestamp")
        .with_timezone(&Utc)
}

pub fn make_trip(id: &str, user_id: &str, start: &str, end: &str, vehicle_id: &str) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        marketplace: "us-east".to_string(),
        start_time: ts(start),
        end_time: ts(end),
        vehicle_id: vehicle_id.to_string(),
    }
}

pub fn make_toll(
    id: &str,
    user_id: &str,
    vehicle_id: &str,
    entry_time: &str,
    tag_and_cash_cost: Option<f64>,
) -> TollEvent {
    TollEvent {
        id: id.to_string(),
        user_id: user_id.to_string(),
        vehicle_id: vehicle_id.to_string(),
        geofence_id_start: 101,
        geofence_id_end: Some(202),
        name_start: "Exit 12".to_string(),
        road_start: "I-90".to_string(),
        name_end: Some("Exit 18".to_string()),
        road_end: Some("I-90".to_string()),
        toll_system_type: Some("barrier".to_string()),
        entry_lat: 41.88,
        entry_lng: -87.63,
        exit_lat: Some(41.9),
        exit_lng: Some(-87.7),
        tag_cost: tag_and_cash_cost,
        cash_cost: tag_and_cash_cost.map(|cost| cost + 1.0),
        license_plate_cost: None,
        tag_and_cash_cost,
        express_lane_cost: None,
        is_express_lane: false,
        entry_time: ts(entry_time),
        exit_time: None,
        currency: Some("USD".to_string()),
        toll_agency_name: vec!["Illinois Tollway".to_string()],
        toll_agency_abbr: vec!["ISTHA".to_string()],
        job_id: "job-1".to_string(),
    }
}

pub fn make_vehicle(vehicle_id: &str, make: &str) -> VehicleRecord {
    VehicleRecord {
        vehicle_id: vehicle_id.to_string(),
        vin: format!("VIN-{vehicle_id}"),
        name: format!("{make} {vehicle_id}"),
        model: "Model X".to_string(),
        make: make.to_string(),
    }
}

/// Trip and tolls shared by the store tests: one trip for U1, two tolls inside
/// it, one toll after it, and one toll for another user.
pub fn scenario() -> (Vec<TripRecord>, Vec<TollEvent>, Vec<VehicleRecord>) {
    let trips = vec![
        make_trip(
            "trip-1",
            "U1",
            "2024-04-09T06:00:00Z",
            "2024-04-09T08:00:00Z",
            "V1",
        ),
        make_trip(
            "trip-2",
            "U1",
            "2024-04-09T09:00:00Z",
            "2024-04-09T10:00:00Z",
            "V2",
        ),
        make_trip(
            "trip-3",
            "U2",
            "2024-04-09T06:00:00Z",
            "2024-04-09T08:00:00Z",
            "V3",
        ),
    ];
    let tolls = vec![
        make_toll("toll-1", "U1", "V1", "2024-04-09T07:00:00Z", Some(3.5)),
        make_toll("toll-2", "U1", "V1", "2024-04-09T07:30:00Z", Some(2.0)),
        make_toll("toll-3", "U1", "V2", "2024-04-09T09:15:00Z", None),
        make_toll("toll-4", "U2", "V3", "2024-04-09T07:10:00Z", Some(8.0)),
    ];
    let vehicles = vec![make_vehicle("V1", "Ford")];
    (trips, tolls, vehicles)
}

pub fn seed(db: &mut Db) {
    let (trips, tolls, vehicles) = scenario();
    db.insert_trips(&trips).expect("insert trips");
    db.insert_toll_events(&tolls).expect("insert tolls");
    db.insert_vehicles(&vehicles).expect("insert vehicles");
}
