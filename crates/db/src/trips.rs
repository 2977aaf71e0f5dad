use rusqlite::params;
use toll_core::{TimeWindow, TripRecord};

use crate::Db;
use crate::error::Result;
use crate::helpers::{TRIP_COLUMNS, format_ts, row_to_trip};

impl Db {
    pub fn insert_trips(&mut self, trips: &[TripRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO trip (
                  id, user_id, marketplace, start_time, end_time, vehicle_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for trip in trips {
                let rows = stmt.execute(params![
                    trip.id,
                    trip.user_id,
                    trip.marketplace,
                    format_ts(trip.start_time),
                    format_ts(trip.end_time),
                    trip.vehicle_id,
                ])?;
                if rows > 0 {
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Trips of `user_id` that start and end inside `window`, in insertion order.
    pub fn trips_in_window(&self, user_id: &str, window: &TimeWindow) -> Result<Vec<TripRecord>> {
        let sql = format!(
            r#"
            SELECT {TRIP_COLUMNS}
            FROM trip
            WHERE user_id = ?1 AND start_time >= ?2 AND end_time <= ?3
            ORDER BY rowid ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            user_id,
            format_ts(window.start),
            format_ts(window.end)
        ])?;
        let mut trips = Vec::new();
        while let Some(row) = rows.next()? {
            trips.push(row_to_trip(row)?);
        }
        Ok(trips)
    }
}
