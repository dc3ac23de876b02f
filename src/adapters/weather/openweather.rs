//! OpenWeather "current weather" adapter.
//!
//! Units are metric and descriptions French, matching the rest of the club's data.

use crate::domain::{DomainError, WeatherDomain, WeatherSnapshot};
use crate::ports::DataSource;
use crate::shared::config::AppConfig;
use serde::Deserialize;
use tracing::{debug, warn};

pub struct OpenWeatherAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    location: String,
}

impl OpenWeatherAdapter {
    /// # Arguments
    /// * `api_url` - API root, e.g. "https://api.openweathermap.org"
    /// * `api_key` - OpenWeather key; without it the adapter reports itself unconfigured
    /// * `location` - City query, e.g. "Bohars,FR"
    pub fn new(api_url: String, api_key: Option<String>, location: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            location,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.weather_api_url_or_default(),
            cfg.weather_api_key.clone(),
            cfg.weather_location_or_default(),
        )
    }
}

#[derive(Deserialize)]
struct CurrentWeatherResponse {
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Deserialize)]
struct Condition {
    id: u32,
    description: String,
}

/// Icon token for an OpenWeather condition code.
pub fn icon_token_for(condition_id: u32) -> &'static str {
    match condition_id {
        200..=299 => "thunderstorm",
        300..=499 => "drizzle",
        500..=599 => "rain",
        600..=699 => "snow",
        700..=799 => "fog",
        800 => "clear",
        801.. => "partly-cloudy",
        _ => "fair",
    }
}

#[async_trait::async_trait]
impl DataSource<WeatherDomain> for OpenWeatherAdapter {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self) -> Result<WeatherSnapshot, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::ConfigurationMissing("weather API key".to_string()))?;

        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.api_url))
            .query(&[
                ("q", self.location.as_str()),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", "fr"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, location = %self.location, "weather API returned error");
            return Err(DomainError::Transport(format!("weather API error {}", status)));
        }

        let body: CurrentWeatherResponse = response.json().await.map_err(|e| {
            DomainError::ShapeValidation(format!("Failed to parse weather response: {}", e.without_url()))
        })?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::ShapeValidation("no weather condition in response".to_string()))?;

        debug!(temp = body.main.temp, code = condition.id, "weather received");
        Ok(WeatherSnapshot {
            temperature_c: body.main.temp.round(),
            condition: condition.description,
            icon_token: icon_token_for(condition.id).to_string(),
        })
    }
}
