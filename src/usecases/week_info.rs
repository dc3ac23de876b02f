//! "This week" use case: the coming Saturday ride and its weather.

use crate::domain::dates::{is_winter_schedule, saturday_of_week};
use crate::domain::queries::find_route;
use crate::domain::{ClubInfo, Difficulty, RoutesDomain, WeatherDomain, WeekInfo};
use crate::usecases::provider::ResilientProvider;
use chrono::NaiveDate;
use std::sync::Arc;

/// Route the club features for the weekly ride until the calendar says otherwise.
const FEATURED_ROUTE_ID: &str = "abers";
const FEATURED_LEADER: &str = "Jean Broudin";

pub struct WeekInfoService {
    club: ClubInfo,
    routes: Arc<ResilientProvider<RoutesDomain>>,
    weather: Arc<ResilientProvider<WeatherDomain>>,
}

impl WeekInfoService {
    pub fn new(
        club: ClubInfo,
        routes: Arc<ResilientProvider<RoutesDomain>>,
        weather: Arc<ResilientProvider<WeatherDomain>>,
    ) -> Self {
        Self {
            club,
            routes,
            weather,
        }
    }

    /// Info for this week's Saturday ride (today's, when `today` is a Saturday),
    /// using whatever the providers hold (fetching them on first use).
    pub async fn current(&self, today: NaiveDate) -> WeekInfo {
        let saturday = saturday_of_week(today);
        let meeting_time = if is_winter_schedule(today) {
            self.club.saturday_winter_time
        } else {
            self.club.saturday_summer_time
        };

        let routes = self.routes.current().await;
        let (route_name, distance_km, difficulty) = match find_route(&routes, FEATURED_ROUTE_ID) {
            Some(r) => (r.name.clone(), r.distance_km, r.difficulty),
            None => ("Circuit des Abers".to_string(), 65.0, Difficulty::B),
        };

        let weather = self.weather.current().await;
        let weather_is_live = self.weather.last_fetch_succeeded();

        WeekInfo {
            date: saturday,
            meeting_time,
            meeting_point: self.club.meeting_point.to_string(),
            route_name,
            distance_km,
            difficulty,
            leader: FEATURED_LEADER.to_string(),
            weather,
            weather_is_live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::fallback_weather;
    use crate::domain::{DataDomain, DomainError, WeatherSnapshot};
    use crate::ports::DataSource;
    use chrono::NaiveTime;

    struct Offline;

    #[async_trait::async_trait]
    impl<D: DataDomain> DataSource<D> for Offline {
        fn is_configured(&self) -> bool {
            false
        }

        async fn fetch(&self) -> Result<D::Value, DomainError> {
            Err(DomainError::Transport("offline".into()))
        }
    }

    struct Sunny;

    #[async_trait::async_trait]
    impl DataSource<WeatherDomain> for Sunny {
        fn is_configured(&self) -> bool {
            true
        }

        async fn fetch(&self) -> Result<WeatherSnapshot, DomainError> {
            Ok(WeatherSnapshot {
                temperature_c: 25.0,
                condition: "Ciel dégagé".to_string(),
                icon_token: "clear".to_string(),
            })
        }
    }

    fn service(weather: Arc<dyn DataSource<WeatherDomain>>) -> WeekInfoService {
        let routes: Arc<dyn DataSource<RoutesDomain>> = Arc::new(Offline);
        WeekInfoService::new(
            ClubInfo::bohars(),
            Arc::new(ResilientProvider::with_default_timeout(routes)),
            Arc::new(ResilientProvider::with_default_timeout(weather)),
        )
    }

    #[tokio::test]
    async fn test_summer_week_with_fallback_weather() {
        let info = service(Arc::new(Offline))
            .current(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap())
            .await;

        assert_eq!(info.date, NaiveDate::from_ymd_opt(2025, 8, 23).unwrap());
        assert_eq!(info.meeting_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(info.route_name, "Circuit des Abers");
        assert_eq!(info.difficulty, Difficulty::B);
        assert_eq!(info.weather, fallback_weather());
        assert!(!info.weather_is_live);
    }

    #[tokio::test]
    async fn test_winter_week_with_live_weather() {
        let info = service(Arc::new(Sunny))
            .current(NaiveDate::from_ymd_opt(2025, 12, 3).unwrap())
            .await;

        assert_eq!(info.date, NaiveDate::from_ymd_opt(2025, 12, 6).unwrap());
        assert_eq!(info.meeting_time, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(info.weather.temperature_c, 25.0);
        assert!(info.weather_is_live);
    }

    #[tokio::test]
    async fn test_saturday_shows_todays_ride() {
        let saturday = NaiveDate::from_ymd_opt(2025, 8, 23).unwrap();
        let info = service(Arc::new(Offline)).current(saturday).await;

        assert_eq!(info.date, saturday);
        assert_eq!(info.meeting_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    }
}
