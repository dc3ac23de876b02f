//! Application configuration. Upstream endpoints, credentials, timeouts.

use serde::Deserialize;

/// Default upper bound for one upstream call, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Groupware (Nextcloud): calendar, route catalog, GPX files
    // ─────────────────────────────────────────────────────────────────────────
    /// Base URL of the Nextcloud instance. Read from CCB_NEXTCLOUD_URL.
    #[serde(default)]
    pub nextcloud_url: Option<String>,

    /// Read from CCB_NEXTCLOUD_USER.
    #[serde(default)]
    pub nextcloud_user: Option<String>,

    /// App password preferred over the account password. Read from CCB_NEXTCLOUD_PASSWORD.
    #[serde(default)]
    pub nextcloud_password: Option<String>,

    /// CalDAV collection of the club calendar. Read from CCB_CALENDAR_PATH.
    #[serde(default)]
    pub calendar_path: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Weather (OpenWeather)
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from CCB_WEATHER_API_KEY.
    #[serde(default)]
    pub weather_api_key: Option<String>,

    /// Read from CCB_WEATHER_API_URL. Defaults to api.openweathermap.org.
    #[serde(default)]
    pub weather_api_url: Option<String>,

    /// City query, e.g. "Bohars,FR". Read from CCB_WEATHER_LOCATION.
    #[serde(default)]
    pub weather_location: Option<String>,

    /// Seconds between background weather refreshes (default 3600). Read from CCB_WEATHER_REFRESH_SECS.
    #[serde(default)]
    pub weather_refresh_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Misc
    // ─────────────────────────────────────────────────────────────────────────
    /// Upper bound for one upstream call. Read from CCB_FETCH_TIMEOUT_SECS.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,

    /// Where GPX downloads are written. Read from CCB_DOWNLOAD_DIR.
    #[serde(default)]
    pub download_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CCB"));
        if let Ok(path) = std::env::var("CCB_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Numeric values from the environment win over the config file.
        if let Ok(s) = std::env::var("CCB_FETCH_TIMEOUT_SECS") {
            if let Ok(n) = s.parse::<u64>() {
                cfg.fetch_timeout_secs = Some(n);
            }
        }
        if let Ok(s) = std::env::var("CCB_WEATHER_REFRESH_SECS") {
            if let Ok(n) = s.parse::<u64>() {
                cfg.weather_refresh_secs = Some(n);
            }
        }
        Ok(cfg)
    }

    /// Returns the upstream call timeout in seconds. Zero is treated as unset.
    pub fn fetch_timeout_secs_or_default(&self) -> u64 {
        self.fetch_timeout_secs
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    /// Returns the weather refresh period in seconds. Defaults to one hour.
    pub fn weather_refresh_secs_or_default(&self) -> u64 {
        self.weather_refresh_secs.filter(|&n| n > 0).unwrap_or(3600)
    }

    pub fn download_dir_or_default(&self) -> String {
        self.download_dir
            .clone()
            .unwrap_or_else(|| "./downloads".to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Nextcloud Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Base URL without trailing slash. Defaults to the club's instance.
    pub fn nextcloud_url_or_default(&self) -> String {
        self.nextcloud_url
            .clone()
            .unwrap_or_else(|| "https://nextcloud.cycloclubbohars.org".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn calendar_path_or_default(&self) -> String {
        self.calendar_path
            .clone()
            .unwrap_or_else(|| "/remote.php/dav/calendars/ccb/personal/".to_string())
    }

    /// Returns true if both Nextcloud credentials are present and non-empty.
    pub fn is_nextcloud_configured(&self) -> bool {
        non_empty(&self.nextcloud_user) && non_empty(&self.nextcloud_password)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Weather Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn weather_api_url_or_default(&self) -> String {
        self.weather_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openweathermap.org".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn weather_location_or_default(&self) -> String {
        self.weather_location
            .clone()
            .unwrap_or_else(|| "Bohars,FR".to_string())
    }

    /// Returns true if a weather API key is present.
    pub fn is_weather_configured(&self) -> bool {
        non_empty(&self.weather_api_key)
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.fetch_timeout_secs_or_default(), 8);
        assert_eq!(cfg.weather_refresh_secs_or_default(), 3600);
        assert_eq!(cfg.weather_location_or_default(), "Bohars,FR");
        assert_eq!(
            cfg.calendar_path_or_default(),
            "/remote.php/dav/calendars/ccb/personal/"
        );
        assert!(!cfg.is_nextcloud_configured());
        assert!(!cfg.is_weather_configured());
    }

    #[test]
    fn test_configured_checks() {
        let cfg = AppConfig {
            nextcloud_url: Some("https://cloud.example.org/".to_string()),
            nextcloud_user: Some("ccb".to_string()),
            nextcloud_password: Some("  ".to_string()),
            weather_api_key: Some("key".to_string()),
            fetch_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(!cfg.is_nextcloud_configured());
        assert!(cfg.is_weather_configured());
        assert_eq!(cfg.nextcloud_url_or_default(), "https://cloud.example.org");
        assert_eq!(cfg.fetch_timeout_secs_or_default(), 8);
    }
}
