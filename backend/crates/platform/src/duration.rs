//! Human-readable Durations
//!
//! Parses TTL strings such as `"3600s"`, `"7D"`, `"15m"`, `"1.5h"` or
//! `"2 days"`. Units are case-insensitive; a bare number is milliseconds.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("Invalid duration: {0:?}")]
    InvalidFormat(String),

    #[error("Unknown duration unit {unit:?} in {input:?}")]
    UnknownUnit { input: String, unit: String },
}

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| DurationParseError::InvalidFormat(input.to_string()))?;

    let unit = unit.trim();
    let millis_per_unit = unit_millis(unit).ok_or_else(|| DurationParseError::UnknownUnit {
        input: input.to_string(),
        unit: unit.to_string(),
    })?;

    let millis = (value * millis_per_unit).round();
    if !millis.is_finite() || millis > u64::MAX as f64 {
        return Err(DurationParseError::InvalidFormat(input.to_string()));
    }

    Ok(Duration::from_millis(millis as u64))
}

fn unit_millis(unit: &str) -> Option<f64> {
    let millis = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };
    Some(millis)
}
