use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toll_core::TimeWindow;

/// Raw report parameters as they arrive from a transport.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WindowParams {
    pub user_id: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Validated user and window shared by both reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportScope {
    pub user_id: String,
    pub window: TimeWindow,
}

/// How the trip report collects tolls for each trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// One toll query per trip.
    PerTrip,
    /// One toll query over all trips, split by trip span in memory.
    #[default]
    Partitioned,
}

impl FromStr for JoinStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "per_trip" => Ok(JoinStrategy::PerTrip),
            "partitioned" => Ok(JoinStrategy::Partitioned),
            other => Err(format!("unsupported join strategy {other}")),
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStrategy::PerTrip => f.write_str("per_trip"),
            JoinStrategy::Partitioned => f.write_str("partitioned"),
        }
    }
}
