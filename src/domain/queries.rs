//! Pure filters over already-loaded collections. No I/O.

use crate::domain::{Difficulty, EventCategory, RouteInfo, ScheduleEntry};
use chrono::NaiveDate;

/// Entries dated `today` or later, ascending by date, at most `limit`.
///
/// Entries on the same date keep their input order.
pub fn filter_upcoming(entries: &[ScheduleEntry], today: NaiveDate, limit: usize) -> Vec<ScheduleEntry> {
    let mut upcoming: Vec<ScheduleEntry> = entries
        .iter()
        .filter(|e| e.date >= today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming.truncate(limit);
    upcoming
}

pub fn events_by_category(entries: &[ScheduleEntry], category: EventCategory) -> Vec<ScheduleEntry> {
    entries
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect()
}

pub fn filter_by_difficulty(routes: &[RouteInfo], difficulty: Difficulty) -> Vec<RouteInfo> {
    routes
        .iter()
        .filter(|r| r.difficulty == difficulty)
        .cloned()
        .collect()
}

pub fn find_route<'a>(routes: &'a [RouteInfo], id: &str) -> Option<&'a RouteInfo> {
    routes.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::{fallback_routes, fallback_schedule};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_upcoming_from_fallback_schedule() {
        let schedule = fallback_schedule();
        let now = d(2025, 8, 20);
        let upcoming = filter_upcoming(&schedule, now, 3);

        assert!(upcoming.len() <= 3);
        assert!(!upcoming.is_empty());
        assert!(upcoming.iter().all(|e| e.date >= now));
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(!upcoming.iter().any(|e| e.id == "sortie-debutants"));
        assert_eq!(upcoming[0].id, "sortie-feminine");
    }

    #[test]
    fn test_upcoming_is_idempotent_and_bounded() {
        let mut schedule = fallback_schedule();
        schedule.reverse();
        let first = filter_upcoming(&schedule, d(2025, 8, 1), 4);
        let second = filter_upcoming(&schedule, d(2025, 8, 1), 4);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].id, "sortie-debutants");
        assert!(filter_upcoming(&schedule, d(2025, 8, 1), 0).is_empty());
    }

    #[test]
    fn test_upcoming_includes_today() {
        let schedule = fallback_schedule();
        let upcoming = filter_upcoming(&schedule, d(2025, 8, 24), 10);
        assert_eq!(upcoming[0].id, "sortie-feminine");
    }

    #[test]
    fn test_filter_by_difficulty() {
        let routes = fallback_routes();
        let easy = filter_by_difficulty(&routes, Difficulty::A);
        let ids: Vec<&str> = easy.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["plougastel", "debutant"]);
        assert_eq!(filter_by_difficulty(&routes, Difficulty::C).len(), 2);
    }

    #[test]
    fn test_events_by_category_and_find_route() {
        let schedule = fallback_schedule();
        assert_eq!(events_by_category(&schedule, EventCategory::Ride).len(), 2);
        let routes = fallback_routes();
        assert_eq!(
            find_route(&routes, "menez-hom").map(|r| r.elevation_m),
            Some(890.0)
        );
        assert!(find_route(&routes, "nowhere").is_none());
    }
}
