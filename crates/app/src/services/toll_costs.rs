use toll_core::{VehicleTollCost, attach_vehicles};

use crate::config::ReportScope;
use crate::error::{AppError, Result};
use crate::services::SharedStore;

#[derive(Clone)]
pub struct TollCostService {
    store: SharedStore,
}

impl TollCostService {
    pub(super) fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Total `tag_and_cash_cost` per vehicle for the scope's user and window,
    /// optionally joined with vehicle metadata.
    pub fn vehicle_totals(
        &self,
        scope: &ReportScope,
        include_vehicle: bool,
    ) -> Result<Vec<VehicleTollCost>> {
        let totals = self
            .store
            .toll_totals_by_vehicle(&scope.user_id, &scope.window)
            .map_err(|err| AppError::store("aggregate toll costs", err))?;
        tracing::debug!(
            user_id = %scope.user_id,
            vehicles = totals.len(),
            "aggregated toll costs"
        );
        if !include_vehicle || totals.is_empty() {
            return Ok(totals);
        }

        let ids: Vec<String> = totals.iter().map(|row| row.vehicle_id.clone()).collect();
        let vehicles = self
            .store
            .vehicles_by_id(&ids)
            .map_err(|err| AppError::store("look up vehicles", err))?;
        Ok(attach_vehicles(totals, vehicles))
    }
}
