//! Schedule source backed by the club's CalDAV calendar.

use super::client::NextcloudClient;
use super::ical::parse_multistatus;
use crate::domain::{DomainError, ScheduleDomain, ScheduleEntry};
use crate::ports::DataSource;
use reqwest::Method;
use std::sync::Arc;
use tracing::info;

const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<d:propfind xmlns:d="DAV:" xmlns:c="urn:ietf:params:xml:ns:caldav">
  <d:prop>
    <d:getetag />
    <c:calendar-data />
  </d:prop>
</d:propfind>"#;

pub struct NextcloudCalendar {
    client: Arc<NextcloudClient>,
    calendar_path: String,
}

impl NextcloudCalendar {
    pub fn new(client: Arc<NextcloudClient>, calendar_path: impl Into<String>) -> Self {
        Self {
            client,
            calendar_path: calendar_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl DataSource<ScheduleDomain> for NextcloudCalendar {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn fetch(&self) -> Result<Vec<ScheduleEntry>, DomainError> {
        let method = Method::from_bytes(b"PROPFIND")
            .map_err(|e| DomainError::Transport(format!("PROPFIND method: {}", e)))?;
        let request = self
            .client
            .request(method, self.client.url(&self.calendar_path))
            .header("Depth", "1")
            .header("Content-Type", "application/xml; charset=utf-8")
            .body(PROPFIND_BODY);

        let body = self.client.send_text(request).await?;
        let entries = parse_multistatus(&body)?;
        info!(events = entries.len(), "calendar events received");
        Ok(entries)
    }
}
