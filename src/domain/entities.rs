//! Domain entities. Pure data structures for the club's data.
//!
//! No HTTP or iCalendar types here. Adapters map upstream payloads into these.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dated club event (ride, tour, social evening...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: EventCategory,
    /// Local wall-clock time; UTC calendar stamps are converted on parse.
    #[serde(default)]
    pub meeting_time: Option<NaiveTime>,
    #[serde(default)]
    pub meeting_point: Option<String>,
    #[serde(default)]
    pub leader: Option<String>,
    #[serde(default)]
    pub requires_registration: bool,
    /// Pace group the event is aimed at, when it has one.
    #[serde(default)]
    pub level: Option<Difficulty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Ride,
    Tour,
    Social,
    Training,
    Competition,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        EventCategory::Ride,
        EventCategory::Tour,
        EventCategory::Social,
        EventCategory::Training,
        EventCategory::Competition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Ride => "ride",
            EventCategory::Tour => "tour",
            EventCategory::Social => "social",
            EventCategory::Training => "training",
            EventCategory::Competition => "competition",
        }
    }

    /// Lenient mapping from free-form upstream labels (English or French).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "ride" | "sortie" => Some(EventCategory::Ride),
            "tour" | "randonnee" | "randonnée" => Some(EventCategory::Tour),
            "social" | "repas" => Some(EventCategory::Social),
            "training" | "formation" | "atelier" => Some(EventCategory::Training),
            "competition" | "compétition" | "brevet" => Some(EventCategory::Competition),
            _ => None,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Club pace tier: A (easy) to C (hard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    A,
    B,
    C,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::A, Difficulty::B, Difficulty::C];

    /// Accepts "A", "b", "Niveau C"...
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let letter = trimmed
            .strip_prefix("Niveau")
            .or_else(|| trimmed.strip_prefix("niveau"))
            .unwrap_or(trimmed)
            .trim();
        match letter.to_ascii_uppercase().as_str() {
            "A" => Some(Difficulty::A),
            "B" => Some(Difficulty::B),
            "C" => Some(Difficulty::C),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Difficulty::A => "A",
            Difficulty::B => "B",
            Difficulty::C => "C",
        };
        f.write_str(letter)
    }
}

/// A route from the club's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub distance_km: f64,
    pub elevation_m: f64,
    pub difficulty: Difficulty,
    /// File name of the GPX track in the groupware's route folder.
    #[serde(default)]
    pub waypoint_file_ref: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub condition: String,
    /// Presentation-neutral icon name, e.g. "partly-cloudy".
    pub icon_token: String,
}

/// Result of a route's waypoint download.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointDownload {
    pub file_name: String,
    pub content: String,
    pub mime_type: &'static str,
    /// True when the upstream file was unavailable and a placeholder was generated.
    pub synthesized: bool,
}
