use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// First and last day covered by `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn bounds_of(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Some((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Some((first, last_day_of_month(first.year(), first.month())?));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        return Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ));
    }

    None
}

/// Parse a period filter into inclusive date bounds.
///
/// Single values (`2025`, `2025-06`, `2025-06-18`) or `start:end` ranges
/// of those (`2025-06:2025-08`, `2024:2025`).
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    let (from, to) = match p.split_once(':') {
        Some((start, end)) => {
            let (from, _) = bounds_of(start).ok_or_else(invalid)?;
            let (_, to) = bounds_of(end).ok_or_else(invalid)?;
            (from, to)
        }
        None => bounds_of(p).ok_or_else(invalid)?,
    };

    if from > to {
        return Err(invalid());
    }
    Ok((from, to))
}
