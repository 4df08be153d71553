use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NOT_AVAILABLE: &str = "N/A";

const NAIVE_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Format the session timestamp as `YYYY-MM-DD HH:MM`.
///
/// Unparseable values are passed through as is, and missing ones become `N/A`.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return NOT_AVAILABLE.to_owned();
    };
    parse(raw).map_or_else(
        || raw.to_owned(),
        |timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Offsets are kept, not converted: the wall-clock time is what gets printed.
fn parse(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some("2024-06-03T17:02:11.653")), "2024-06-03 17:02");
        assert_eq!(format_timestamp(Some("2024-06-03T17:02:11")), "2024-06-03 17:02");
        assert_eq!(format_timestamp(Some("2024-06-03T17:02")), "2024-06-03 17:02");
        assert_eq!(format_timestamp(Some("2024-06-03 17:02:11")), "2024-06-03 17:02");
        assert_eq!(format_timestamp(Some("2024-06-03")), "2024-06-03 00:00");
    }

    #[test]
    fn test_offset_is_not_converted() {
        assert_eq!(format_timestamp(Some("2024-06-03T17:02:11Z")), "2024-06-03 17:02");
        assert_eq!(format_timestamp(Some("2024-06-03T17:02:11.5+02:00")), "2024-06-03 17:02");
    }

    #[test]
    fn test_malformed_passes_through() {
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(Some("")), "");
        assert_eq!(format_timestamp(Some("2024-13-45T99:00:00")), "2024-13-45T99:00:00");
    }

    #[test]
    fn test_missing() {
        assert_eq!(format_timestamp(None), "N/A");
    }
}
