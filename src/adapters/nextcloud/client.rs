//! Thin HTTP client for the club's Nextcloud instance (basic auth, status check).

use crate::domain::DomainError;
use crate::shared::config::AppConfig;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use tracing::{debug, warn};

/// Longest upstream error body kept in an error message.
const ERROR_BODY_PREVIEW: usize = 200;

/// Shared by the calendar and files adapters.
pub struct NextcloudClient {
    client: Client,
    base_url: String,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    installed: bool,
    #[serde(default)]
    maintenance: bool,
    #[serde(default)]
    versionstring: Option<String>,
}

impl NextcloudClient {
    /// # Arguments
    /// * `base_url` - Instance root, e.g. "https://nextcloud.example.org"
    /// * `user` / `password` - Account name and app password; both required for calls
    pub fn new(base_url: impl Into<String>, user: Option<String>, password: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user: user.filter(|s| !s.trim().is_empty()),
            password: password.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.nextcloud_url_or_default(),
            cfg.nextcloud_user.clone(),
            cfg.nextcloud_password.clone(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (which starts with '/').
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a file under `folder` (e.g. "/remote.php/webdav/Circuits"), with the
    /// name percent-encoded as a single path segment.
    pub(crate) fn file_url(&self, folder: &str, file_name: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.url(folder))
            .map_err(|e| DomainError::ConfigurationMissing(format!("invalid Nextcloud URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DomainError::ConfigurationMissing("Nextcloud URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(file_name);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.user {
            Some(user) => builder.basic_auth(user, self.password.as_deref()),
            None => builder,
        }
    }

    /// Send and return the body as text. Non-2xx statuses are transport failures.
    pub(crate) async fn send_text(&self, request: RequestBuilder) -> Result<String, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Nextcloud returned error");
            return Err(DomainError::Transport(format!(
                "Nextcloud error {}: {}",
                status,
                text.chars().take(ERROR_BODY_PREVIEW).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to read response body: {}", e)))?;
        debug!(status = %status, bytes = body.len(), "Nextcloud response received");
        Ok(body)
    }

    /// Queries `/status.php`. True when the instance reports itself installed and
    /// not in maintenance. Does not need credentials.
    pub async fn check_status(&self) -> Result<bool, DomainError> {
        let body = self
            .send_text(self.client.get(self.url("/status.php")))
            .await?;
        let status: StatusResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::ShapeValidation(format!("unexpected status.php body: {}", e)))?;
        debug!(
            version = status.versionstring.as_deref().unwrap_or("unknown"),
            installed = status.installed,
            maintenance = status.maintenance,
            "Nextcloud status"
        );
        Ok(status.installed && !status.maintenance)
    }
}
