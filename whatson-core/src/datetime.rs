//! Parsing and formatting for the two date formats the content API uses.
//!
//! Storage timestamps are ISO 8601 (`2018-01-09T11:00+00:00`); seconds
//! and the UTC offset are both optional, and a missing offset reads as
//! +00:00. Display dates are non-zero-padded `day/month/year`
//! (`13/1/18` or `13/1/2018`); a 2-digit year means 20xx.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Normalized storage form, minute precision: `2018-01-09T11:00+00:00`.
const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),

    #[error("invalid date '{0}': expected day/month/year")]
    DisplayDate(String),
}

/// Parse a storage timestamp.
///
/// Accepts RFC 3339, offset timestamps without seconds, and naive
/// timestamps (read as +00:00).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, DateError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, STORAGE_FORMAT) {
        return Ok(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(DateError::Timestamp(raw.to_string()))
}

/// Format a timestamp in the normalized storage form.
///
/// Expansion deduplicates occurrence start times by exact equality of
/// this string, so it must be deterministic at minute precision.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// Format a calendar date in the display form, e.g. `13/1/2018`.
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Parse a display date.
///
/// Exactly three `/`-separated numeric components; any other separator
/// or field count is an error rather than a guess. Years must be 2
/// digits (20xx) or 4 digits.
pub fn parse_display_date(raw: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::DisplayDate(raw.to_string());

    let mut parts = raw.split('/');
    let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y), None) => (d, m, y),
        _ => return Err(invalid()),
    };

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().map_err(|_| invalid())?,
        4 => year.parse().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Move a timestamp to another calendar date, preserving its clock time
/// and UTC offset.
pub fn on_date(dt: DateTime<FixedOffset>, date: NaiveDate) -> DateTime<FixedOffset> {
    dt + date.signed_duration_since(dt.date_naive())
}
