use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use toll_core::TimeWindow;

use crate::config::{ReportScope, WindowParams};
use crate::error::{AppError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    StartTime,
    EndTime,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::StartTime => f.write_str("start_time"),
            TimeField::EndTime => f.write_str("end_time"),
        }
    }
}

/// Checks presence of every parameter, then parses both bounds.
///
/// Missing values are reported together, before any timestamp is parsed.
/// Blank values count as missing; otherwise values are used exactly as given.
pub fn resolve_report_scope(params: &WindowParams) -> Result<ReportScope> {
    let user_id = present(params.user_id.as_deref());
    let start = present(params.start_time.as_deref());
    let end = present(params.end_time.as_deref());

    let (Some(user_id), Some(start), Some(end)) = (user_id, start, end) else {
        let missing = [
            ("user_id", user_id.is_none()),
            ("start_time", start.is_none()),
            ("end_time", end.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect();
        return Err(AppError::MissingParameter(missing));
    };

    let start = parse_timestamp(TimeField::StartTime, start)?;
    let end = parse_timestamp(TimeField::EndTime, end)?;
    if start > end {
        return Err(AppError::InvalidRange { start, end });
    }
    Ok(ReportScope {
        user_id: user_id.to_string(),
        window: TimeWindow::new(start, end),
    })
}

pub fn parse_timestamp(field: TimeField, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimeFormat { field })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
