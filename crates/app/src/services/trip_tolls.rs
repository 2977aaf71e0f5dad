use toll_core::{TripRecord, TripWithTolls, partition_tolls_by_trip, trips_span};

use crate::config::{JoinStrategy, ReportScope};
use crate::error::{AppError, Result};
use crate::services::SharedStore;

#[derive(Clone)]
pub struct TripTollService {
    store: SharedStore,
    strategy: JoinStrategy,
}

impl TripTollService {
    pub(super) fn new(store: SharedStore, strategy: JoinStrategy) -> Self {
        Self { store, strategy }
    }

    /// Trips inside the scope window, each with the user's tolls entered
    /// during the trip. Any failed query aborts the whole report.
    pub fn trips_with_tolls(&self, scope: &ReportScope) -> Result<Vec<TripWithTolls>> {
        let trips = self
            .store
            .trips_in_window(&scope.user_id, &scope.window)
            .map_err(|err| AppError::store("fetch trips", err))?;
        tracing::debug!(
            user_id = %scope.user_id,
            trips = trips.len(),
            strategy = %self.strategy,
            "fetched trips"
        );
        match self.strategy {
            JoinStrategy::PerTrip => self.join_per_trip(&scope.user_id, trips),
            JoinStrategy::Partitioned => self.join_partitioned(&scope.user_id, trips),
        }
    }

    fn join_per_trip(&self, user_id: &str, trips: Vec<TripRecord>) -> Result<Vec<TripWithTolls>> {
        trips
            .into_iter()
            .map(|trip| {
                let tolls = self
                    .store
                    .tolls_in_window(user_id, &trip.span())
                    .map_err(|err| {
                        AppError::store(format!("fetch tolls for trip {}", trip.id), err)
                    })?;
                Ok(TripWithTolls { trip, tolls })
            })
            .collect()
    }

    fn join_partitioned(
        &self,
        user_id: &str,
        trips: Vec<TripRecord>,
    ) -> Result<Vec<TripWithTolls>> {
        let Some(span) = trips_span(&trips) else {
            return Ok(Vec::new());
        };
        let tolls = self
            .store
            .tolls_in_window(user_id, &span)
            .map_err(|err| AppError::store("fetch tolls for trips", err))?;
        Ok(partition_tolls_by_trip(trips, &tolls))
    }
}
