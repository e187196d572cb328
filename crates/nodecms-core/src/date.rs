//! Content date parsing.
//!
//! Dates in content come in several shapes: epoch milliseconds (as a number
//! or a string of digits, which is what the Markdown loader emits), RFC 3339
//! timestamps, or plain `YYYY-MM-DD` dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Parse a content date. Returns `None` for anything unrecognized.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parse a date string in any of the supported formats.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::<Utc>::from_timestamp_millis(millis);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_epoch_millis() {
        let expected = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000);
        assert_eq!(parse_date(&json!(1_700_000_000_000_i64)), expected);
        assert_eq!(parse_date(&json!("1700000000000")), expected);
    }

    #[test]
    fn test_calendar_formats() {
        let dt = parse_date(&json!("2024-01-14")).expect("date");
        assert_eq!(dt.to_rfc3339(), "2024-01-14T00:00:00+00:00");

        let dt = parse_date(&json!("2024-01-14T10:30:00+02:00")).expect("rfc3339");
        assert_eq!(dt.to_rfc3339(), "2024-01-14T08:30:00+00:00");

        assert!(parse_date(&json!("2024-01-14T10:30:00")).is_some());
    }

    #[test]
    fn test_unrecognized() {
        assert!(parse_date(&json!("yesterday")).is_none());
        assert!(parse_date(&json!("")).is_none());
        assert!(parse_date(&json!(true)).is_none());
        assert!(parse_date(&Value::Null).is_none());
    }
}
