//! Static club facts: identity, contact, pace levels and the weekly timetable.

use crate::domain::{Difficulty, WeatherSnapshot};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub struct PaceLevel {
    pub difficulty: Difficulty,
    pub distance: &'static str,
    pub description: &'static str,
    pub pace: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClubInfo {
    pub name: &'static str,
    pub short_name: &'static str,
    pub founded: u16,
    pub email: &'static str,
    pub meeting_point: &'static str,
    pub levels: Vec<PaceLevel>,
    /// Saturday start time, November to March.
    pub saturday_winter_time: NaiveTime,
    /// Saturday start time, April to October.
    pub saturday_summer_time: NaiveTime,
    pub wednesday_time: NaiveTime,
}

impl ClubInfo {
    pub fn bohars() -> Self {
        Self {
            name: "Cyclo Club de Bohars",
            short_name: "CCB",
            founded: 1985,
            email: "contact@cycloclubbohars.org",
            meeting_point: "Devant la mairie de Bohars",
            levels: vec![
                PaceLevel {
                    difficulty: Difficulty::A,
                    distance: "40-50km",
                    description: "Débutants et cyclisme loisir",
                    pace: "Allure tranquille",
                },
                PaceLevel {
                    difficulty: Difficulty::B,
                    distance: "60-70km",
                    description: "Cyclistes confirmés",
                    pace: "Allure modérée",
                },
                PaceLevel {
                    difficulty: Difficulty::C,
                    distance: "80km+",
                    description: "Sportifs et grands rouleurs",
                    pace: "Allure soutenue",
                },
            ],
            saturday_winter_time: hm(13, 30),
            saturday_summer_time: hm(14, 0),
            wednesday_time: hm(13, 30),
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// The coming Saturday ride with its weather.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekInfo {
    pub date: NaiveDate,
    pub meeting_time: NaiveTime,
    pub meeting_point: String,
    pub route_name: String,
    pub distance_km: f64,
    pub difficulty: Difficulty,
    pub leader: String,
    pub weather: WeatherSnapshot,
    /// False when `weather` is the bundled fallback.
    pub weather_is_live: bool,
}
