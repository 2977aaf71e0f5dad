use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use toll_db::DbError;

use crate::util::time::TimeField;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required query parameters: {}", .0.join(", "))]
    MissingParameter(Vec<&'static str>),
    #[error("Invalid {field} format. Use RFC3339 format (e.g., 2024-04-09T06:35:33Z)")]
    InvalidTimeFormat { field: TimeField },
    #[error("Invalid time range: start_time {start} is after end_time {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("{0}")]
    InvalidParameter(String),
    #[error("Failed to {context}: {source}")]
    BackendQueryFailed {
        context: String,
        #[source]
        source: DbError,
    },
    #[error("Failed to decode result of {context}: {source}")]
    DecodeFailed {
        context: String,
        #[source]
        source: DbError,
    },
    #[error("Store did not answer within {}s", .0.as_secs_f64())]
    StoreTimeout(Duration),
}

impl AppError {
    /// Wraps a store error, separating shape mismatches from query failures.
    pub fn store(context: impl Into<String>, source: DbError) -> Self {
        let context = context.into();
        if source.is_decode() {
            AppError::DecodeFailed { context, source }
        } else {
            AppError::BackendQueryFailed { context, source }
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidTimeFormat { .. }
            | AppError::InvalidRange { .. }
            | AppError::InvalidParameter(_) => 400,
            AppError::BackendQueryFailed { .. }
            | AppError::DecodeFailed { .. }
            | AppError::StoreTimeout(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Error body returned to clients: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub error: String,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self {
            status: err.status(),
            error: err.to_string(),
        }
    }
}
