//! Timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Get current UTC timestamp
///
/// Handlers read this once per request and pass it down, so every
/// upcoming/past decision in one response uses the same boundary.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Display formats for show start times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

pub fn format_datetime(value: &DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    value.format(pattern).to_string()
}

/// Naive layouts accepted from the show form, interpreted as UTC
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a submitted start time
///
/// Accepts RFC 3339 (any offset, converted to UTC) or one of the naive
/// layouts above.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::InvalidInput("Start time is required".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("Unrecognized start time: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_format_medium() {
        let dt = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt, DateFormat::Medium), "Tue 05, 21, 2019 9:30PM");
    }

    #[test]
    fn test_format_full() {
        let dt = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(
            format_datetime(&dt, DateFormat::Full),
            "Sunday April, 1, 2035 at 8:00PM"
        );
    }

    #[test]
    fn test_parse_rfc3339_with_millis() {
        let dt = parse_start_time("2019-05-21T21:30:00.000Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_offset_converted() {
        let dt = parse_start_time("2019-05-21T23:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_layouts() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap();
        assert_eq!(parse_start_time("2024-01-02 03:04:00").unwrap(), expected);
        assert_eq!(parse_start_time("2024-01-02 03:04").unwrap(), expected);
        assert_eq!(parse_start_time("2024-01-02T03:04").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_start_time(""), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_start_time("next tuesday"), Err(Error::InvalidInput(_))));
    }
}
