mod toll_costs;
mod trip_tolls;

use std::sync::Arc;

use toll_db::ReportStore;

use crate::app::AppConfig;

pub use toll_costs::TollCostService;
pub use trip_tolls::TripTollService;

/// Store handle shared by the services and every request.
pub type SharedStore = Arc<dyn ReportStore>;

/// Service registry for the report operations.
#[derive(Clone)]
pub struct AppServices {
    pub toll_costs: TollCostService,
    pub trip_tolls: TripTollService,
}

impl AppServices {
    pub fn new(config: &AppConfig, store: SharedStore) -> Self {
        Self {
            toll_costs: TollCostService::new(store.clone()),
            trip_tolls: TripTollService::new(store, config.join_strategy),
        }
    }
}
