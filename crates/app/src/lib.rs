pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod util;

pub use app::{AppConfig, AppState, close_sqlite_store, open_sqlite_store};
pub use config::{JoinStrategy, ReportScope, WindowParams};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, SharedStore, TollCostService, TripTollService};
pub use util::time::{TimeField, parse_timestamp, resolve_report_scope};
