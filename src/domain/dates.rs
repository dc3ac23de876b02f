//! Calendar helpers: relative labels, the weekly Saturday ride, seasons.

use chrono::{Datelike, Duration, NaiveDate};

/// Distances (in days) up to which "in N days" / "N days ago" is used.
/// Beyond that the label is a short absolute date.
pub const RELATIVE_LABEL_WINDOW_DAYS: i64 = 6;

/// Human label for `target` seen from `today`.
///
/// Counted labels stop at 6 days so a count never repeats a weekday: "in 7
/// days" is the same weekday as today and easy to misread, and "in 9 days"
/// reads worse in a schedule list than "3 Sep".
pub fn relative_date_label(today: NaiveDate, target: NaiveDate) -> String {
    let diff = (target - today).num_days();
    match diff {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 1 && d <= RELATIVE_LABEL_WINDOW_DAYS => format!("in {} days", d),
        d if d < -1 && -d <= RELATIVE_LABEL_WINDOW_DAYS => format!("{} days ago", -d),
        _ => short_date(target),
    }
}

/// Day and abbreviated month, e.g. "3 Aug".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// Saturday of the club week containing `today` (weeks run Sunday to Saturday).
/// On a Saturday this is today's ride.
pub fn saturday_of_week(today: NaiveDate) -> NaiveDate {
    let days_from_sunday = i64::from(today.weekday().num_days_from_sunday());
    today + Duration::days(6 - days_from_sunday)
}

/// Winter timetable runs November through March.
pub fn is_winter_schedule(date: NaiveDate) -> bool {
    let month = date.month();
    month >= 11 || month <= 3
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_relative_labels_near() {
        let today = d(2025, 8, 20);
        assert_eq!(relative_date_label(today, d(2025, 8, 20)), "today");
        assert_eq!(relative_date_label(today, d(2025, 8, 21)), "tomorrow");
        assert_eq!(relative_date_label(today, d(2025, 8, 19)), "yesterday");
        assert_eq!(relative_date_label(today, d(2025, 8, 24)), "in 4 days");
        assert_eq!(relative_date_label(today, d(2025, 8, 17)), "3 days ago");
    }

    #[test]
    fn test_relative_labels_fall_back_to_absolute() {
        let today = d(2025, 8, 20);
        assert_eq!(relative_date_label(today, d(2025, 9, 7)), "7 Sep");
        assert_eq!(relative_date_label(today, d(2025, 8, 3)), "3 Aug");
        // Boundary: 6 days is still relative, 7 is not.
        assert_eq!(relative_date_label(today, d(2025, 8, 26)), "in 6 days");
        assert_eq!(relative_date_label(today, d(2025, 8, 27)), "27 Aug");
    }

    #[test]
    fn test_saturday_of_week() {
        // 2025-08-20 is a Wednesday.
        assert_eq!(saturday_of_week(d(2025, 8, 20)), d(2025, 8, 23));
        // On the Saturday itself, the ride is today.
        assert_eq!(saturday_of_week(d(2025, 8, 23)), d(2025, 8, 23));
        // Sunday starts a new week.
        assert_eq!(saturday_of_week(d(2025, 8, 24)), d(2025, 8, 30));
        // Across a month end.
        assert_eq!(saturday_of_week(d(2025, 8, 31)), d(2025, 9, 6));
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(d(2025, 8, 3)), "3 Aug");
        assert_eq!(short_date(d(2025, 12, 25)), "25 Dec");
    }

    #[test]
    fn test_winter_schedule_and_season() {
        assert!(is_winter_schedule(d(2025, 11, 1)));
        assert!(is_winter_schedule(d(2025, 3, 31)));
        assert!(!is_winter_schedule(d(2025, 4, 1)));
        assert_eq!(Season::of(d(2025, 8, 20)), Season::Summer);
        assert_eq!(Season::of(d(2025, 12, 1)), Season::Winter);
    }
}
