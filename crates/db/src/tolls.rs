use rusqlite::params;
use toll_core::{TimeWindow, TollEvent, VehicleTollCost};

use crate::Db;
use crate::error::Result;
use crate::helpers::{TOLL_COLUMNS, format_ts, row_to_toll};

impl Db {
    pub fn insert_toll_events(&mut self, tolls: &[TollEvent]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare(&format!(
                r#"
                INSERT OR IGNORE INTO toll_event ({TOLL_COLUMNS})
                VALUES (
                  ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                  ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26
                )
                "#
            ))?;
            for toll in tolls {
                let agency_names = serde_json::to_string(&toll.toll_agency_name)?;
                let agency_abbrs = serde_json::to_string(&toll.toll_agency_abbr)?;
                let rows = stmt.execute(params![
                    toll.id,
                    toll.user_id,
                    toll.vehicle_id,
                    toll.geofence_id_start,
                    toll.geofence_id_end,
                    toll.name_start,
                    toll.road_start,
                    toll.name_end,
                    toll.road_end,
                    toll.toll_system_type,
                    toll.entry_lat,
                    toll.entry_lng,
                    toll.exit_lat,
                    toll.exit_lng,
                    toll.tag_cost,
                    toll.cash_cost,
                    toll.license_plate_cost,
                    toll.tag_and_cash_cost,
                    toll.express_lane_cost,
                    toll.is_express_lane,
                    format_ts(toll.entry_time),
                    toll.exit_time.map(format_ts),
                    toll.currency,
                    agency_names,
                    agency_abbrs,
                    toll.job_id,
                ])?;
                if rows > 0 {
                    inserted += 1;
                }
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Toll events of `user_id` entered inside `window`, in insertion order.
    pub fn toll_events_in_window(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<TollEvent>> {
        let sql = format!(
            r#"
            SELECT {TOLL_COLUMNS}
            FROM toll_event
            WHERE user_id = ?1 AND entry_time >= ?2 AND entry_time <= ?3
            ORDER BY rowid ASC
            "#
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![
            user_id,
            format_ts(window.start),
            format_ts(window.end)
        ])?;
        let mut tolls = Vec::new();
        while let Some(row) = rows.next()? {
            tolls.push(row_to_toll(row)?);
        }
        Ok(tolls)
    }

    pub fn toll_totals_by_vehicle(
        &self,
        user_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<VehicleTollCost>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT vehicle_id, SUM(COALESCE(tag_and_cash_cost, 0.0)) AS toll_cost
            FROM toll_event
            WHERE user_id = ?1 AND entry_time >= ?2 AND entry_time <= ?3
            GROUP BY vehicle_id
            ORDER BY vehicle_id ASC
            "#,
        )?;
        let rows = stmt.query_map(
            params![user_id, format_ts(window.start), format_ts(window.end)],
            |row| {
                Ok(VehicleTollCost {
                    vehicle_id: row.get(0)?,
                    toll_cost: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                    vehicle: None,
                })
            },
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
