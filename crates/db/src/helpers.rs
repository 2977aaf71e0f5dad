use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use toll_core::{TollEvent, TripRecord};

use crate::error::Result;

pub(crate) const TRIP_COLUMNS: &str = "id, user_id, marketplace, start_time, end_time, vehicle_id";

pub(crate) const TOLL_COLUMNS: &str = r#"
    id, user_id, vehicle_id, geofence_id_start, geofence_id_end, name_start, road_start,
    name_end, road_end, toll_system_type, entry_lat, entry_lng, exit_lat, exit_lng,
    tag_cost, cash_cost, license_plate_cost, tag_and_cash_cost, express_lane_cost,
    is_express_lane, entry_time, exit_time, currency, toll_agency_name, toll_agency_abbr,
    job_id
"#;

/// Fixed-width UTC form with all nine fraction digits, so string comparison
/// in SQL matches time order at full precision.
pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

pub(crate) fn row_to_trip(row: &Row<'_>) -> Result<TripRecord> {
    let start_time: String = row.get(3)?;
    let end_time: String = row.get(4)?;
    Ok(TripRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        marketplace: row.get(2)?,
        start_time: parse_ts(&start_time)?,
        end_time: parse_ts(&end_time)?,
        vehicle_id: row.get(5)?,
    })
}

pub(crate) fn row_to_toll(row: &Row<'_>) -> Result<TollEvent> {
    let entry_time: String = row.get(20)?;
    let exit_time: Option<String> = row.get(21)?;
    let agency_names: String = row.get(23)?;
    let agency_abbrs: String = row.get(24)?;
    Ok(TollEvent {
        id: row.get(0)?,
        user_id: row.get(1)?,
        vehicle_id: row.get(2)?,
        geofence_id_start: row.get(3)?,
        geofence_id_end: row.get(4)?,
        name_start: row.get(5)?,
        road_start: row.get(6)?,
        name_end: row.get(7)?,
        road_end: row.get(8)?,
        toll_system_type: row.get(9)?,
        entry_lat: row.get(10)?,
        entry_lng: row.get(11)?,
        exit_lat: row.get(12)?,
        exit_lng: row.get(13)?,
        tag_cost: row.get(14)?,
        cash_cost: row.get(15)?,
        license_plate_cost: row.get(16)?,
        tag_and_cash_cost: row.get(17)?,
        express_lane_cost: row.get(18)?,
        is_express_lane: row.get(19)?,
        entry_time: parse_ts(&entry_time)?,
        exit_time: exit_time.as_deref().map(parse_ts).transpose()?,
        currency: row.get(22)?,
        toll_agency_name: serde_json::from_str(&agency_names)?,
        toll_agency_abbr: serde_json::from_str(&agency_abbrs)?,
        job_id: row.get(25)?,
    })
}

pub(crate) fn repeat_vars(count: usize) -> String {
    let mut vars = String::with_capacity(count * 2);
    for index in 0..count {
        if index > 0 {
            vars.push(',');
        }
        vars.push('?');
    }
    vars
}
