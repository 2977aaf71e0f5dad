use rusqlite::{params, params_from_iter};
use toll_core::VehicleRecord;

use crate::Db;
use crate::error::Result;
use crate::helpers::repeat_vars;

// Keeps each IN list well under SQLite's bound parameter limit.
const LOOKUP_CHUNK: usize = 500;

impl Db {
    pub fn insert_vehicles(&mut self, vehicles: &[VehicleRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO vehicle (vehicle_id, vin, name, model, make)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(vehicle_id) DO UPDATE SET
                  vin = excluded.vin,
                  name = excluded.name,
                  model = excluded.model,
                  make = excluded.make
                "#,
            )?;
            for vehicle in vehicles {
                written += stmt.execute(params![
                    vehicle.vehicle_id,
                    vehicle.vin,
                    vehicle.name,
                    vehicle.model,
                    vehicle.make,
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    pub fn vehicles_by_id(&self, vehicle_ids: &[String]) -> Result<Vec<VehicleRecord>> {
        let mut vehicles = Vec::new();
        for chunk in vehicle_ids.chunks(LOOKUP_CHUNK) {
            let sql = format!(
                r#"
                SELECT vehicle_id, vin, name, model, make
                FROM vehicle
                WHERE vehicle_id IN ({})
                ORDER BY vehicle_id ASC
                "#,
                repeat_vars(chunk.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok(VehicleRecord {
                    vehicle_id: row.get(0)?,
                    vin: row.get(1)?,
                    name: row.get(2)?,
                    model: row.get(3)?,
                    make: row.get(4)?,
                })
            })?;
            for row in rows {
                vehicles.push(row?);
            }
        }
        Ok(vehicles)
    }
}
