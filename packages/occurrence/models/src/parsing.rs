//! Soft-fail parsing helpers for occurrence fields.
//!
//! Occurrence exports are loosely typed: numbers arrive as strings or
//! floats, dates arrive in several Darwin Core shapes. Every helper here
//! returns `None` instead of an error so a bad field only degrades the one
//! derivation that needs it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the leading integer of a string.
///
/// Accepts optional leading whitespace and sign, then consumes digits up to
/// the first non-digit: `"4.0"` is 4, `"12 birds"` is 12, `"abc"` is `None`.
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a decimal coordinate. Returns `None` for empty, malformed or
/// non-finite input.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a Darwin Core `eventDate`.
///
/// Supports RFC 3339 (the wall-clock time as written is kept), ISO date-times
/// with or without fractional seconds, `YYYY-MM-DD`, `YYYY-MM` and `YYYY`.
/// For interval values (`start/end`) the start is used.
#[must_use]
pub fn parse_event_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.split('/').next()?.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let parts: Vec<&str> = s.split('-').collect();
    let all_digits = |p: &&str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    match parts.as_slice() {
        [year, month] if all_digits(year) && all_digits(month) && year.len() == 4 => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?.and_hms_opt(0, 0, 0)
        }
        [year] if all_digits(year) && year.len() == 4 => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1)?.and_hms_opt(0, 0, 0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn int_prefix_handles_float_strings() {
        assert_eq!(parse_int_prefix("4.0"), Some(4));
        assert_eq!(parse_int_prefix("  12 birds"), Some(12));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+7"), Some(7));
        assert_eq!(parse_int_prefix("0"), Some(0));
    }

    #[test]
    fn int_prefix_rejects_non_numeric() {
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(".5"), None);
    }

    #[test]
    fn coordinates_reject_garbage() {
        assert_eq!(parse_coordinate(" -42.5 "), Some(-42.5));
        assert_eq!(parse_coordinate("147"), Some(147.0));
        assert_eq!(parse_coordinate("north"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn parses_plain_date() {
        let dt = parse_event_date("2020-01-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, 1, 15));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parses_iso_datetimes() {
        let dt = parse_event_date("2021-06-03T14:30:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.hour()), (2021, 6, 14));

        let dt = parse_event_date("2021-06-03T14:30:00.250").unwrap();
        assert_eq!(dt.minute(), 30);

        let dt = parse_event_date("2021-06-03 08:00:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn rfc3339_keeps_recorded_wall_clock() {
        let dt = parse_event_date("2020-01-01T01:00:00+10:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2020, 1, 1, 1));
    }

    #[test]
    fn parses_partial_dates() {
        let dt = parse_event_date("2019-11").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2019, 11, 1));

        let dt = parse_event_date("2018").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2018, 1, 1));
    }

    #[test]
    fn uses_interval_start() {
        let dt = parse_event_date("2017-03-30/2017-04-02").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2017, 3, 30));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(parse_event_date("").is_none());
        assert!(parse_event_date("yesterday").is_none());
        assert!(parse_event_date("2020-13-01").is_none());
        assert!(parse_event_date("2020-13").is_none());
        assert!(parse_event_date("20").is_none());
    }
}
