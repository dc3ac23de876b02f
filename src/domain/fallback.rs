//! Static datasets bundled with the program. Served whenever the upstream is
//! unavailable, unconfigured or returns something invalid.

use crate::domain::{Difficulty, EventCategory, RouteInfo, ScheduleEntry, WeatherSnapshot};
use chrono::{NaiveDate, NaiveTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

pub fn fallback_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry {
            id: "sortie-debutants".to_string(),
            date: date(2025, 8, 3),
            title: "Sortie découverte débutants".to_string(),
            description: "Circuit facile de 30km autour de Bohars. Parfait pour débuter ou reprendre le cyclisme en douceur.".to_string(),
            category: EventCategory::Ride,
            meeting_time: time(13, 30),
            meeting_point: Some("Mairie de Bohars".to_string()),
            leader: Some("Marie Dupont".to_string()),
            requires_registration: false,
            level: Some(Difficulty::A),
        },
        ScheduleEntry {
            id: "tour-brest".to_string(),
            date: date(2025, 8, 10),
            title: "Randonnée \"Tour de Brest\"".to_string(),
            description: "Grande randonnée de 85km avec passage par les plus beaux points de vue de la rade de Brest.".to_string(),
            category: EventCategory::Tour,
            meeting_time: time(13, 0),
            meeting_point: Some("Mairie de Bohars".to_string()),
            leader: Some("Jean Broudin".to_string()),
            requires_registration: false,
            level: Some(Difficulty::C),
        },
        ScheduleEntry {
            id: "repas-club".to_string(),
            date: date(2025, 8, 15),
            title: "Repas du club".to_string(),
            description: "Repas annuel du club au restaurant \"Les Embruns\" à Plougonvelin. Inscription obligatoire.".to_string(),
            category: EventCategory::Social,
            meeting_time: time(19, 30),
            meeting_point: Some("Restaurant Les Embruns, Plougonvelin".to_string()),
            leader: None,
            requires_registration: true,
            level: None,
        },
        ScheduleEntry {
            id: "maintenance".to_string(),
            date: date(2025, 8, 17),
            title: "Atelier mécanique vélo".to_string(),
            description: "Apprenez les bases de la mécanique vélo : réglages, réparations courantes, entretien.".to_string(),
            category: EventCategory::Training,
            meeting_time: time(14, 0),
            meeting_point: Some("Garage de Paul, Bohars".to_string()),
            leader: Some("Paul Martin".to_string()),
            requires_registration: false,
            level: None,
        },
        ScheduleEntry {
            id: "sortie-feminine".to_string(),
            date: date(2025, 8, 24),
            title: "Sortie 100% féminine".to_string(),
            description: "Sortie réservée aux femmes du club, dans une ambiance conviviale et détendue.".to_string(),
            category: EventCategory::Ride,
            meeting_time: time(14, 0),
            meeting_point: Some("Mairie de Bohars".to_string()),
            leader: Some("Sophie Moreau".to_string()),
            requires_registration: false,
            level: Some(Difficulty::B),
        },
        ScheduleEntry {
            id: "brevet-100".to_string(),
            date: date(2025, 9, 7),
            title: "Brevet 100km".to_string(),
            description: "Participez au brevet départemental de 100km. Défi personnel et convivialité assurés.".to_string(),
            category: EventCategory::Competition,
            meeting_time: time(7, 0),
            meeting_point: Some("Brest".to_string()),
            leader: None,
            requires_registration: true,
            level: Some(Difficulty::C),
        },
    ]
}

pub fn fallback_routes() -> Vec<RouteInfo> {
    fn route(
        id: &str,
        name: &str,
        description: &str,
        distance_km: f64,
        elevation_m: f64,
        difficulty: Difficulty,
        highlights: &[&str],
    ) -> RouteInfo {
        RouteInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            distance_km,
            elevation_m,
            difficulty,
            waypoint_file_ref: Some(format!("{}.gpx", id)),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
        }
    }

    vec![
        route(
            "abers",
            "Circuit des Abers",
            "Magnifique parcours le long des abers du Nord Finistère avec vues imprenables sur l'océan.",
            65.0,
            450.0,
            Difficulty::B,
            &["Aber Wrac'h", "Phare de l'île Vierge", "Côte sauvage"],
        ),
        route(
            "plougastel",
            "Boucle de Plougastel",
            "Circuit vallonné traversant la presqu'île de Plougastel-Daoulas et ses vergers de fraises.",
            42.0,
            320.0,
            Difficulty::A,
            &["Vergers de fraises", "Pont de l'Iroise", "Village de Plougastel"],
        ),
        route(
            "tour-rade",
            "Tour de Rade",
            "Grand tour de la rade de Brest avec passage par le pont de l'Iroise et retour par la corniche.",
            85.0,
            680.0,
            Difficulty::C,
            &["Rade de Brest", "Pont de l'Iroise", "Corniche"],
        ),
        route(
            "menez-hom",
            "Montée du Menez-Hom",
            "Défi sportif avec ascension du célèbre Menez-Hom et panorama exceptionnel.",
            68.0,
            890.0,
            Difficulty::C,
            &["Sommet du Menez-Hom", "Panorama 360°", "Presqu'île de Crozon"],
        ),
        route(
            "debutant",
            "Circuit Découverte",
            "Parfait pour débuter, ce circuit facile fait découvrir les environs immédiats de Bohars.",
            28.0,
            180.0,
            Difficulty::A,
            &["Forêt du Cranou", "Vallée de l'Elorn", "Patrimoine local"],
        ),
    ]
}

pub fn fallback_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: 22.0,
        condition: "Partiellement nuageux".to_string(),
        icon_token: "partly-cloudy".to_string(),
    }
}
