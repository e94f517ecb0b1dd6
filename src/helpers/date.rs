//! Date helper functions

use chrono::{DateTime, Utc};

/// ISO 8601 with millisecond precision in UTC, e.g. `2023-08-05T00:00:00.000Z`
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Long display format, e.g. `August 5, 2023`
pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Calendar date, e.g. `2023-08-05`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formats() {
        let date = Utc.with_ymd_and_hms(2023, 8, 5, 0, 0, 0).unwrap();
        assert_eq!(iso_timestamp(&date), "2023-08-05T00:00:00.000Z");
        assert_eq!(long_date(&date), "August 5, 2023");
        assert_eq!(short_date(&date), "2023-08-05");
    }
}
