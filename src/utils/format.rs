use chrono::NaiveDate;

/// Renders a date range the way the request tables display it.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%Y-%m-%d").to_string()
    } else {
        format!("{} → {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    }
}

/// Day counts come from the server and may be fractional (half days).
/// Whole numbers drop the trailing ".0".
pub fn day_count(days: f64) -> String {
    if (days.fract()).abs() < f64::EPSILON {
        format!("{} d", days as i64)
    } else {
        format!("{:.1} d", days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn single_day_range_collapses() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(date_range(day, day), "2024-12-15");
    }

    #[test]
    fn multi_day_range_shows_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        assert_eq!(date_range(start, end), "2024-12-15 → 2024-12-16");
    }

    #[test]
    fn day_count_formats_whole_and_half_days() {
        assert_eq!(day_count(2.0), "2 d");
        assert_eq!(day_count(0.5), "0.5 d");
    }
}
