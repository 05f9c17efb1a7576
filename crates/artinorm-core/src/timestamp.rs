//! Timestamp repair and conversion.
//!
//! Upstream extractors emit timestamps with seven fractional digits, which
//! downstream consumers mis-read. [`repair`] trims them back to milliseconds.
//! [`canonicalize`] additionally understands .NET JSON dates and epoch
//! numbers. [`infer_year`] fills in the year syslog lines leave out.

use crate::error::{NormalizeError, Result};
use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Millisecond precision, UTC, `Z` suffix.
pub const MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Second precision, no zone suffix. Used for syslog lines.
pub const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Exactly four surplus digits after the millisecond fraction, then a
// non-digit or the end. Anything longer is left alone so repair stays
// idempotent.
static SURPLUS_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3})\d{4}(\D.*)?$")
        .expect("surplus-digit pattern must compile")
});

static DOTNET_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/Date\((-?\d+)([+-]\d{4})?\)/$").expect(".NET date pattern must compile")
});

/// Strip the four surplus fractional digits from `ts`, if present.
///
/// Strings that do not have the corrupted shape are returned unchanged.
pub fn repair_str(ts: &str) -> String {
    match SURPLUS_DIGITS.captures(ts) {
        Some(caps) => {
            let suffix = caps.get(2).map_or("", |m| m.as_str());
            format!("{}{}", &caps[1], suffix)
        }
        None => ts.to_string(),
    }
}

/// Repair a timestamp field. Absent, null and non-string values yield `None`.
pub fn repair(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(repair_str)
}

/// Convert a .NET JSON date (`/Date(1609459200123)/`, optionally with a
/// `+hhmm` suffix) to a millisecond-precision UTC timestamp.
///
/// The number is already the UTC instant; the offset suffix only records the
/// zone the value was serialized in.
pub fn from_dotnet(s: &str) -> Result<String> {
    let caps = DOTNET_DATE
        .captures(s)
        .ok_or_else(|| NormalizeError::MalformedTimestamp(s.to_string()))?;
    let millis: i64 = caps[1]
        .parse()
        .map_err(|_| NormalizeError::MalformedTimestamp(s.to_string()))?;
    from_epoch_millis(millis)
}

pub fn from_epoch_millis(millis: i64) -> Result<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format(MILLIS_FORMAT).to_string())
        .ok_or_else(|| NormalizeError::MalformedTimestamp(millis.to_string()))
}

// Epoch seconds unless the magnitude only makes sense as milliseconds
// (10^11 seconds is past the year 5000).
fn from_epoch_number(n: &serde_json::Number) -> Result<String> {
    let millis = match (n.as_i64(), n.as_f64()) {
        (Some(i), _) if i.unsigned_abs() >= 100_000_000_000 => i,
        (Some(i), _) => i.saturating_mul(1000),
        (None, Some(f)) if f.abs() >= 1e11 => f.round() as i64,
        (None, Some(f)) => (f * 1000.0).round() as i64,
        (None, None) => return Err(NormalizeError::MalformedTimestamp(n.to_string())),
    };
    from_epoch_millis(millis)
}

/// Best-effort conversion of any timestamp-ish field to its canonical string.
///
/// Never fails: an unusable value becomes `None` and the reason is logged.
pub fn canonicalize(value: Option<&Value>) -> Option<String> {
    let converted = match value? {
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) if s.starts_with("/Date(") => from_dotnet(s),
        Value::String(s) => Ok(repair_str(s)),
        Value::Number(n) => from_epoch_number(n),
        _ => return None,
    };
    match converted {
        Ok(ts) => Some(ts),
        Err(err) => {
            tracing::debug!(error = %err, "dropping timestamp");
            None
        }
    }
}

/// Attach a year to a month/day/time that carries none.
///
/// The current year of `now` is assumed; if the month lies after the current
/// month the line must be from last year. A date in the current month but on
/// a future day is not corrected, nor are lines older than a year.
pub fn infer_year(month: u32, day: u32, time: NaiveTime, now: DateTime<Utc>) -> Option<NaiveDateTime> {
    let mut year = now.year();
    if month > now.month() {
        year -= 1;
    }
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.and_time(time))
}

/// Parse a syslog `Mon DD HH:MM:SS` stamp and format it at second precision
/// with an inferred year.
pub fn syslog_timestamp(stamp: &str, now: DateTime<Utc>) -> Result<String> {
    let malformed = || NormalizeError::MalformedTimestamp(stamp.to_string());
    let mut parts = stamp.split_whitespace();
    let (Some(month), Some(day), Some(time), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };
    let month = month.parse::<Month>().map_err(|_| malformed())?.number_from_month();
    let day: u32 = day.parse().map_err(|_| malformed())?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|_| malformed())?;
    infer_year(month, day, time, now)
        .map(|dt| dt.format(SECONDS_FORMAT).to_string())
        .ok_or_else(malformed)
}
