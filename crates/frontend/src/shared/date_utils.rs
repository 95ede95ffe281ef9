/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Datelike, Utc};

/// The backend sends `0001-01-01T00:00:00Z` for timestamps that were never set.
pub fn is_set(ts: &DateTime<Utc>) -> bool {
    ts.year() > 1
}

/// Timestamp as DD.MM.YYYY HH:MM:SS, `"—"` when absent.
pub fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    ts.filter(|t| is_set(t))
        .map(|t| t.format("%d.%m.%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Date only, `"Never"` when absent (used for tag expiry).
pub fn format_expiry(ts: Option<&DateTime<Utc>>) -> String {
    ts.filter(|t| is_set(t))
        .map(|t| t.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "Never".to_string())
}

/// Elapsed time between two instants as `1h 05m` / `12m`.
pub fn format_duration(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    let minutes = (*end - *start).num_minutes().max(0);
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// Parse a `YYYY-MM-DD` input value into midnight UTC.
pub fn parse_input_date(value: &str) -> Option<DateTime<Utc>> {
    let date = chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Value for `<input type="date">`.
pub fn to_input_date(ts: Option<&DateTime<Utc>>) -> String {
    ts.filter(|t| is_set(t))
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_timestamp_is_treated_as_missing() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(Some(&zero)), "—");
        assert_eq!(format_timestamp(None), "—");
        assert_eq!(format_expiry(Some(&zero)), "Never");
        assert_eq!(to_input_date(Some(&zero)), "");
    }

    #[test]
    fn formats_real_timestamps() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_timestamp(Some(&ts)), "15.03.2024 14:02:26");
        assert_eq!(format_expiry(Some(&ts)), "15.03.2024");
        assert_eq!(to_input_date(Some(&ts)), "2024-03-15");
    }

    #[test]
    fn test_format_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 15, 11, 5, 0).unwrap();
        assert_eq!(format_duration(&start, &end), "1h 05m");
        assert_eq!(format_duration(&end, &start), "0m");
    }

    #[test]
    fn test_parse_input_date() {
        let parsed = parse_input_date("2025-12-31").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("31.12.2025"), None);
    }
}
