//! "Add to my calendar" links for club events and the weekly ride.

use crate::domain::{DomainError, ScheduleEntry, WeekInfo};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use reqwest::Url;

pub const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
/// Event times are club wall-clock times.
pub const CLUB_TIME_ZONE: &str = "Europe/Paris";
/// Hours booked for an event, counted from the meeting time.
pub const EVENT_DURATION_HOURS: i64 = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum InviteTime {
    /// Start and end, local to `CLUB_TIME_ZONE`.
    Span(NaiveDateTime, NaiveDateTime),
    /// No meeting time known.
    AllDay(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarInvite {
    pub title: String,
    pub when: InviteTime,
    pub details: String,
    pub location: String,
}

impl CalendarInvite {
    pub fn for_entry(entry: &ScheduleEntry) -> Self {
        let when = match entry.meeting_time {
            Some(time) => span_from(entry.date.and_time(time)),
            None => InviteTime::AllDay(entry.date),
        };
        let mut details = entry.description.clone();
        if let Some(leader) = &entry.leader {
            details.push_str(&format!("\nResponsable: {}", leader));
        }
        Self {
            title: format!("CCB - {}", entry.title),
            when,
            details,
            location: entry.meeting_point.clone().unwrap_or_default(),
        }
    }

    pub fn for_week(week: &WeekInfo) -> Self {
        Self {
            title: format!("CCB - {}", week.route_name),
            when: span_from(week.date.and_time(week.meeting_time)),
            details: format!(
                "Sortie vélo du Cyclo Club de Bohars\n{:.0}km - Niveau {}\nResponsable: {}",
                week.distance_km, week.difficulty, week.leader
            ),
            location: week.meeting_point.clone(),
        }
    }

    /// Value of the `dates` parameter: "start/end" stamps, or dates for an
    /// all-day event (end exclusive).
    pub fn dates_param(&self) -> String {
        match &self.when {
            InviteTime::Span(start, end) => format!(
                "{}/{}",
                start.format("%Y%m%dT%H%M%S"),
                end.format("%Y%m%dT%H%M%S")
            ),
            InviteTime::AllDay(day) => format!(
                "{}/{}",
                day.format("%Y%m%d"),
                (*day + Duration::days(1)).format("%Y%m%d")
            ),
        }
    }

    /// Google Calendar "create event" link with every field pre-filled.
    pub fn google_calendar_url(&self) -> Result<Url, DomainError> {
        let dates = self.dates_param();
        Url::parse_with_params(
            GOOGLE_CALENDAR_URL,
            &[
                ("action", "TEMPLATE"),
                ("text", self.title.as_str()),
                ("dates", dates.as_str()),
                ("details", self.details.as_str()),
                ("location", self.location.as_str()),
                ("ctz", CLUB_TIME_ZONE),
            ],
        )
        .map_err(|e| DomainError::ShapeValidation(format!("calendar link: {}", e)))
    }
}

fn span_from(start: NaiveDateTime) -> InviteTime {
    InviteTime::Span(start, start + Duration::hours(EVENT_DURATION_HOURS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::{fallback_schedule, fallback_weather};
    use crate::domain::{ClubInfo, Difficulty};
    use chrono::NaiveTime;
    use std::collections::HashMap;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_entry_invite_lasts_four_hours() {
        let entry = &fallback_schedule()[4];
        let invite = CalendarInvite::for_entry(entry);

        assert_eq!(invite.title, "CCB - Sortie 100% féminine");
        assert_eq!(
            invite.when,
            InviteTime::Span(dt(2025, 8, 24, 14, 0), dt(2025, 8, 24, 18, 0))
        );
        assert_eq!(invite.dates_param(), "20250824T140000/20250824T180000");
        assert!(invite.details.ends_with("\nResponsable: Sophie Moreau"));
        assert_eq!(invite.location, "Mairie de Bohars");
    }

    #[test]
    fn test_late_event_ends_next_day() {
        let mut entry = fallback_schedule()[2].clone();
        entry.meeting_time = NaiveTime::from_hms_opt(22, 0, 0);
        let invite = CalendarInvite::for_entry(&entry);

        assert_eq!(invite.dates_param(), "20250815T220000/20250816T020000");
        // No leader: nothing appended.
        assert!(!invite.details.contains("Responsable"));
    }

    #[test]
    fn test_entry_without_time_is_all_day() {
        let mut entry = fallback_schedule()[0].clone();
        entry.meeting_time = None;
        entry.meeting_point = None;
        let invite = CalendarInvite::for_entry(&entry);

        assert_eq!(invite.when, InviteTime::AllDay(entry.date));
        assert_eq!(invite.dates_param(), "20250803/20250804");
        assert_eq!(invite.location, "");
    }

    #[test]
    fn test_week_invite() {
        let club = ClubInfo::bohars();
        let week = WeekInfo {
            date: NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            meeting_time: club.saturday_winter_time,
            meeting_point: club.meeting_point.to_string(),
            route_name: "Circuit des Abers".to_string(),
            distance_km: 65.0,
            difficulty: Difficulty::B,
            leader: "Jean Broudin".to_string(),
            weather: fallback_weather(),
            weather_is_live: false,
        };
        let invite = CalendarInvite::for_week(&week);

        assert_eq!(invite.title, "CCB - Circuit des Abers");
        assert_eq!(invite.dates_param(), "20251206T133000/20251206T173000");
        assert_eq!(
            invite.details,
            "Sortie vélo du Cyclo Club de Bohars\n65km - Niveau B\nResponsable: Jean Broudin"
        );
        assert_eq!(invite.location, "Devant la mairie de Bohars");
    }

    #[test]
    fn test_google_url_encodes_every_field() {
        let invite = CalendarInvite::for_entry(&fallback_schedule()[4]);
        let url = invite.google_calendar_url().unwrap();

        assert_eq!(url.host_str(), Some("calendar.google.com"));
        let query = url.query().unwrap();
        assert!(query.contains("text=CCB+-+Sortie+100%25+f%C3%A9minine"));
        assert!(query.contains("dates=20250824T140000%2F20250824T180000"));
        assert!(query.contains("%0AResponsable%3A+Sophie+Moreau"));
        assert!(!query.contains(' '));

        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["action"], "TEMPLATE");
        assert_eq!(pairs["text"], invite.title);
        assert_eq!(pairs["details"], invite.details);
        assert_eq!(pairs["location"], "Mairie de Bohars");
        assert_eq!(pairs["ctz"], "Europe/Paris");
    }
}
