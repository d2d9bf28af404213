// ============================================================
// Layer 4 — Timestamp Conversion
// ============================================================
// Turns the raw Timestamp cell of a review into a datetime.
//
// Conversion is deliberately late: rows load fine with any text
// in the Timestamp column, and a bad value only surfaces when the
// time-series table is built. The error names the CSV line.
//
// Accepted forms (surrounding whitespace ignored):
//   RFC 3339            2024-01-05T10:30:00Z, 2024-01-05T10:30:00+02:00
//   date + time         2024-01-05 10:30:00, 2024-01-05T10:30:00,
//                       2024-01-05 10:30, 01/05/2024 10:30
//   date only           2024-01-05, 2024/01/05, 01/05/2024, 05.01.2024
//
// Offsets are normalised to UTC and then dropped, so every value
// in a report shares one naive time axis.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::loader::COL_TIMESTAMP;
use crate::domain::review::Review;
use crate::error::{Result, ReviewError};

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse a timestamp string, or None if no known format matches.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert a review's timestamp, reporting the line on failure.
pub fn review_datetime(review: &Review) -> Result<NaiveDateTime> {
    parse_datetime(&review.timestamp).ok_or_else(|| ReviewError::Parse {
        line:   review.line,
        column: COL_TIMESTAMP.to_string(),
        value:  review.timestamp.clone(),
        reason: "unrecognised date/time format".to_string(),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(parse_datetime("2024-01-05"), Some(dt("2024-01-05 00:00:00")));
        assert_eq!(parse_datetime("01/05/2024"), Some(dt("2024-01-05 00:00:00")));
    }

    #[test]
    fn test_date_and_time() {
        assert_eq!(parse_datetime("2024-01-05 10:30:15"), Some(dt("2024-01-05 10:30:15")));
        assert_eq!(parse_datetime("2024-01-05T10:30:15"), Some(dt("2024-01-05 10:30:15")));
        assert_eq!(parse_datetime(" 2024-01-05 10:30 "), Some(dt("2024-01-05 10:30:00")));
    }

    #[test]
    fn test_rfc3339_is_normalised_to_utc() {
        assert_eq!(
            parse_datetime("2024-01-05T12:00:00+02:00"),
            Some(dt("2024-01-05 10:00:00"))
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
    }

    #[test]
    fn test_review_datetime_error_names_line() {
        let review = Review::new(9, "ok", "P", "web", "soon", "a");
        match review_datetime(&review) {
            Err(ReviewError::Parse { line, value, .. }) => {
                assert_eq!(line, 9);
                assert_eq!(value, "soon");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
