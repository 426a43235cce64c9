//! Calendar date parsing for bloom records.
//!
//! Accepts the date shapes seen across bloom datasets:
//!
//! - ISO 8601 calendar dates: `2020-03-25`, optionally with a time part
//!   (`2020-03-25T08:30`, `2020-03-25T08:30:00Z`, `2020-03-25T08:30+09:00`),
//!   of which only the date as written is kept
//! - Slash and text-month forms: `2020/03/25`, `03/25/2020`, `25-Mar-2020`,
//!   `Mar 25, 2020`, `25 March 2020`
//! - Month/day only (`Mar 25`, `--03-25`), completed with the record's year
//! - Split year, month, and day cells, where the month may be a number or an
//!   English month name
//!
//! Values are compared by calendar order, never by their text.

use std::str::FromStr;

use bloom_model::ParseError;
use chrono::{DateTime, Month, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const OFFSET_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y/%m/%d",
    "%m/%d/%Y", // US: 03/25/2020
    "%d-%b-%Y", // 25-Mar-2020
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%b-%d",
];

const MONTH_DAY_FORMATS: [&str; 2] = ["%b %d %Y", "%B %d %Y"];

/// Parses a 4-digit year.
pub fn parse_year(value: &str) -> Result<i32, ParseError> {
    let trimmed = value.trim();
    let malformed = || ParseError::MalformedYear {
        value: trimmed.to_string(),
    };
    if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let year: i32 = trimmed.parse().map_err(|_| malformed())?;
    if year < 1000 {
        return Err(malformed());
    }
    Ok(year)
}

/// Parses a month given as `1`-`12`, `04`, `Apr`, or `April`.
pub fn parse_month(value: &str) -> Result<u32, ParseError> {
    let trimmed = value.trim();
    let malformed = || ParseError::MalformedMonth {
        value: trimmed.to_string(),
    };
    if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
        let month: u32 = trimmed.parse().map_err(|_| malformed())?;
        return if (1..=12).contains(&month) {
            Ok(month)
        } else {
            Err(malformed())
        };
    }
    Month::from_str(trimmed)
        .map(|month| month.number_from_month())
        .map_err(|_| malformed())
}

/// Parses a day of month `1`-`31`; calendar validity is checked later.
pub fn parse_day(value: &str) -> Result<u32, ParseError> {
    let trimmed = value.trim();
    let malformed = || ParseError::MalformedDay {
        value: trimmed.to_string(),
    };
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let day: u32 = trimmed.parse().map_err(|_| malformed())?;
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(malformed())
    }
}

/// Builds a date from numeric components, rejecting impossible days.
pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ParseError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ParseError::InvalidCalendarDate { year, month, day })
}

/// Parses split year, month, and day cells.
pub fn parse_date_parts(year: &str, month: &str, day: &str) -> Result<NaiveDate, ParseError> {
    let year = parse_year(year)?;
    let month = parse_month(month)?;
    let day = parse_day(day)?;
    calendar_date(year, month, day)
}

/// Parses a single-cell date.
///
/// `year_hint` completes month/day-only values such as `Mar 25`.
pub fn parse_full_date(value: &str, year_hint: Option<i32>) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    let malformed = || ParseError::MalformedDate {
        value: trimmed.to_string(),
    };
    if trimmed.is_empty() {
        return Err(malformed());
    }

    if let Some((year, month, day)) = iso_date_parts(trimmed) {
        return calendar_date(year, month, day);
    }

    if trimmed.contains('T') || trimmed.contains(':') {
        if let Some(date) = offset_datetime_date(trimmed) {
            return Ok(date);
        }
        // A bare UTC designator on a datetime without seconds.
        let local = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);
        for fmt in &DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(local, fmt) {
                return Ok(dt.date());
            }
        }
    }

    for fmt in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    if let Some(year) = year_hint {
        if let Some(rest) = trimmed.strip_prefix("--")
            && let Some((month, day)) = rest.split_once('-')
        {
            return calendar_date(year, parse_month(month)?, parse_day(day)?);
        }
        let with_year = format!("{trimmed} {year}");
        for fmt in &MONTH_DAY_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&with_year, fmt) {
                return Ok(date);
            }
        }
    }

    Err(malformed())
}

/// Date part of a datetime carrying `Z` or a numeric offset, in its own offset.
fn offset_datetime_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date_naive())
}

/// Splits `YYYY-M[M]-D[D]` into numbers without validating the calendar.
fn iso_date_parts(value: &str) -> Option<(i32, u32, u32)> {
    let mut parts = value.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if year.len() != 4 || !all_digits(year) {
        return None;
    }
    if month.len() > 2 || day.len() > 2 || !all_digits(month) || !all_digits(day) {
        return None;
    }
    Some((year.parse().ok()?, month.parse().ok()?, day.parse().ok()?))
}
