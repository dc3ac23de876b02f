//! Route catalog and GPX files stored in the groupware's "Circuits" folder (WebDAV).
//!
//! The catalog is a JSON array of route records (`catalog.json`), the tracks are
//! plain GPX files next to it.

use super::client::NextcloudClient;
use crate::domain::{DomainError, RouteInfo, RoutesDomain};
use crate::ports::{DataSource, WaypointSource};
use reqwest::Method;
use std::sync::Arc;
use tracing::info;

const ROUTES_FOLDER: &str = "/remote.php/webdav/Circuits";
const CATALOG_FILE: &str = "catalog.json";

pub struct NextcloudRouteFiles {
    client: Arc<NextcloudClient>,
}

impl NextcloudRouteFiles {
    pub fn new(client: Arc<NextcloudClient>) -> Self {
        Self { client }
    }

    async fn get_file(&self, file_name: &str) -> Result<String, DomainError> {
        let url = self.client.file_url(ROUTES_FOLDER, file_name)?;
        let request = self.client.request(Method::GET, url);
        self.client.send_text(request).await
    }
}

#[async_trait::async_trait]
impl DataSource<RoutesDomain> for NextcloudRouteFiles {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn fetch(&self) -> Result<Vec<RouteInfo>, DomainError> {
        let body = self.get_file(CATALOG_FILE).await?;
        let routes: Vec<RouteInfo> = serde_json::from_str(&body).map_err(|e| {
            DomainError::ShapeValidation(format!("Failed to parse route catalog: {}", e))
        })?;
        info!(routes = routes.len(), "route catalog received");
        Ok(routes)
    }
}

#[async_trait::async_trait]
impl WaypointSource for NextcloudRouteFiles {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn fetch_waypoint_file(&self, file_ref: &str) -> Result<String, DomainError> {
        // Catalog entries may carry a leading folder, e.g. "/circuits/abers.gpx".
        let name = file_ref.rsplit('/').next().unwrap_or(file_ref);
        self.get_file(name).await
    }
}
