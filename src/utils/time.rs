//! Time utilities: parsing `--at` values into local timestamps.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

fn localize(naive: NaiveDateTime, raw: &str) -> AppResult<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::InvalidTime(format!("{} is ambiguous in the local timezone", raw)))
}

/// Parse a user supplied instant.
///
/// Accepted: `HH:MM[:SS]` (today), `YYYY-MM-DD HH:MM[:SS]` (also with `T`),
/// or a full RFC 3339 timestamp.
pub fn parse_at(raw: &str) -> AppResult<DateTime<Local>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local));
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, raw);
        }
    }

    if let Some(t) = parse_time(s) {
        return localize(crate::utils::date::today().and_time(t), raw);
    }

    Err(AppError::InvalidTime(raw.to_string()))
}

pub fn parse_optional_at(input: Option<&String>) -> AppResult<Option<DateTime<Local>>> {
    input.map(|s| parse_at(s)).transpose()
}
