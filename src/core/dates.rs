use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Days reported for an event whose date cannot be parsed
pub const UNPARSEABLE_DAYS: i64 = 9999;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Errors that can occur while reading an event date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Empty date string")]
    Empty,

    #[error("Unrecognized date format: {0}")]
    Unrecognized(String),
}

/// Parse an ISO-8601 date or naive datetime
///
/// Accepts `YYYY-MM-DD` or `YYYYMMDD`, optionally followed by `T` or a space
/// and `HH`, `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`. Every field must be zero
/// padded. A single trailing `Z` marker is stripped. No timezone conversion
/// happens, so values carrying a numeric offset are rejected.
pub fn parse_event_date(raw: &str) -> Result<NaiveDateTime, DateParseError> {
    let value = raw.strip_suffix('Z').unwrap_or(raw);
    if value.is_empty() {
        return Err(DateParseError::Empty);
    }

    let unrecognized = || DateParseError::Unrecognized(raw.to_string());

    let (date_part, time_part) = match value.find(|c: char| c == 'T' || c == ' ') {
        Some(idx) => (&value[..idx], Some(&value[idx + 1..])),
        None => (value, None),
    };

    let date = parse_date_part(date_part).ok_or_else(unrecognized)?;
    let time = match time_part {
        Some(time) => parse_time_part(time).ok_or_else(unrecognized)?,
        None => NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(unrecognized)?,
    };

    Ok(date.and_time(time))
}

fn parse_date_part(value: &str) -> Option<NaiveDate> {
    let (year, month, day) = if has_shape(value, "dddd-dd-dd") {
        (&value[0..4], &value[5..7], &value[8..10])
    } else if has_shape(value, "dddddddd") {
        (&value[0..4], &value[4..6], &value[6..8])
    } else {
        return None;
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_time_part(value: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match value.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };

    let (hour, minute, second) = if has_shape(clock, "dd") {
        (&clock[0..2], "0", "0")
    } else if has_shape(clock, "dd:dd") {
        (&clock[0..2], &clock[3..5], "0")
    } else if has_shape(clock, "dd:dd:dd") {
        (&clock[0..2], &clock[3..5], &clock[6..8])
    } else {
        return None;
    };

    let nanos = match fraction {
        // Fractions only follow full seconds
        Some(_) if clock.len() != 8 => return None,
        Some(digits) => parse_fraction_nanos(digits)?,
        None => 0,
    };

    NaiveTime::from_hms_nano_opt(
        hour.parse().ok()?,
        minute.parse().ok()?,
        second.parse().ok()?,
        nanos,
    )
}

/// Fractional seconds as nanoseconds, digits past nine are dropped
fn parse_fraction_nanos(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = &digits[..digits.len().min(9)];
    let scale = 10u32.pow(9 - significant.len() as u32);
    Some(significant.parse::<u32>().ok()? * scale)
}

/// `d` in `shape` matches one ASCII digit, any other byte matches itself
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(v, s)| if s == b'd' { v.is_ascii_digit() } else { v == s })
}

/// Whole days from `now` until the event date
///
/// Uses `floor(seconds / 86400 + 0.999)`, which rounds any partial day up
/// except for remainders under roughly 86 seconds. Unparseable dates yield
/// [`UNPARSEABLE_DAYS`].
pub fn days_until(raw: &str, now: NaiveDateTime) -> i64 {
    match parse_event_date(raw) {
        Ok(event_date) => days_between(now, event_date),
        Err(e) => {
            tracing::trace!("{}, using sentinel", e);
            UNPARSEABLE_DAYS
        }
    }
}

#[inline]
fn days_between(now: NaiveDateTime, event_date: NaiveDateTime) -> i64 {
    let delta = event_date - now;
    let seconds = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    };

    (seconds / SECONDS_PER_DAY + 0.999).floor() as i64
}
