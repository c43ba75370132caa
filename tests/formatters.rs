#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use timecard::libs::formatter::{format_duration, format_optional_duration, format_time};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(&Duration::zero()), "0:00:00");
        assert_eq!(format_duration(&Duration::seconds(59)), "0:00:59");
        assert_eq!(format_duration(&(Duration::hours(8) + Duration::minutes(45))), "8:45:00");
        assert_eq!(format_duration(&Duration::hours(26)), "26:00:00");
    }

    #[test]
    fn test_negative_duration_shows_zero() {
        assert_eq!(format_duration(&Duration::minutes(-10)), "0:00:00");
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(format_optional_duration(None), "-");
        assert_eq!(format_optional_duration(Some(Duration::minutes(15))), "0:15:00");

        let t = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(7, 5, 9).unwrap();
        assert_eq!(format_time(Some(t)), "07:05:09");
        assert_eq!(format_time(None), "-");
    }
}
