use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Formats a UTC timestamp the way it is persisted in the metadata table:
/// ISO-8601 without an offset, microsecond precision.
pub fn format_stored_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Formats a UTC timestamp for API responses (ISO-8601 with a `Z` suffix).
pub fn format_utc_iso(ts: NaiveDateTime) -> String {
    format!("{}Z", format_stored_timestamp(ts))
}

/// Parses a stored timestamp. Accepts naive ISO-8601 (with `T` or space)
/// and RFC 3339 values carrying an offset, which are normalised to UTC.
/// Returns `None` for anything else.
pub fn parse_stored_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_micro_opt(14, 5, 9, 123456)
            .unwrap()
    }

    #[test]
    fn test_stored_format_parses_back() {
        let stored = format_stored_timestamp(ts());
        assert_eq!(stored, "2025-10-22T14:05:09.123456");
        assert_eq!(parse_stored_timestamp(&stored), Some(ts()));
    }

    #[test]
    fn test_api_format_has_z_suffix() {
        assert_eq!(format_utc_iso(ts()), "2025-10-22T14:05:09.123456Z");
    }

    #[test]
    fn test_parse_variants() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 22)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(parse_stored_timestamp("2025-10-22T14:05:09"), Some(expected));
        assert_eq!(parse_stored_timestamp("2025-10-22 14:05:09"), Some(expected));
        assert_eq!(
            parse_stored_timestamp("2025-10-22T16:05:09+02:00"),
            Some(expected)
        );
        assert_eq!(parse_stored_timestamp("2025-10-22T14:05:09Z"), Some(expected));
    }

    #[test]
    fn test_malformed_values_are_none() {
        assert_eq!(parse_stored_timestamp(""), None);
        assert_eq!(parse_stored_timestamp("yesterday"), None);
        assert_eq!(parse_stored_timestamp("2025-13-45T00:00:00"), None);
    }
}
