//! Route catalog use case: listing by difficulty and GPX downloads.
//!
//! A download never fails because of the upstream: when the waypoint file cannot be
//! fetched, a single-point placeholder track is generated instead.

use crate::domain::queries::{filter_by_difficulty, find_route};
use crate::domain::track::{GPX_MIME_TYPE, TrackDocument, download_file_name};
use crate::domain::{Difficulty, DomainError, RouteInfo, RoutesDomain, WaypointDownload};
use crate::ports::WaypointSource;
use crate::usecases::provider::ResilientProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct RouteCatalog {
    routes: Arc<ResilientProvider<RoutesDomain>>,
    waypoints: Arc<dyn WaypointSource>,
    timeout: Duration,
}

impl RouteCatalog {
    pub fn new(
        routes: Arc<ResilientProvider<RoutesDomain>>,
        waypoints: Arc<dyn WaypointSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            routes,
            waypoints,
            timeout,
        }
    }

    /// Routes of one tier, or all of them.
    pub async fn list(&self, difficulty: Option<Difficulty>) -> Vec<RouteInfo> {
        let routes = self.routes.current().await;
        match difficulty {
            Some(d) => filter_by_difficulty(&routes, d),
            None => routes,
        }
    }

    /// GPX content for `route_id`. Errors only when the route is unknown.
    pub async fn download_waypoints(&self, route_id: &str) -> Result<WaypointDownload, DomainError> {
        let routes = self.routes.current().await;
        let route = find_route(&routes, route_id)
            .ok_or_else(|| DomainError::NotFound(format!("route '{}'", route_id)))?;
        let file_name = download_file_name(route);

        match self.fetch_remote(route).await {
            Ok(content) => {
                info!(route = %route.id, bytes = content.len(), "waypoint file downloaded");
                Ok(WaypointDownload {
                    file_name,
                    content,
                    mime_type: GPX_MIME_TYPE,
                    synthesized: false,
                })
            }
            Err(e) => {
                if matches!(e, DomainError::ConfigurationMissing(_)) {
                    info!(route = %route.id, reason = %e, "generating placeholder track");
                } else {
                    warn!(route = %route.id, error = %e, "waypoint download failed; generating placeholder track");
                }
                Ok(WaypointDownload {
                    file_name,
                    content: TrackDocument::placeholder(route).to_gpx()?,
                    mime_type: GPX_MIME_TYPE,
                    synthesized: true,
                })
            }
        }
    }

    async fn fetch_remote(&self, route: &RouteInfo) -> Result<String, DomainError> {
        let file_ref = route.waypoint_file_ref.as_deref().ok_or_else(|| {
            DomainError::ConfigurationMissing(format!("route '{}' has no waypoint file", route.id))
        })?;
        if !self.waypoints.is_configured() {
            return Err(DomainError::ConfigurationMissing(
                "waypoint source has no endpoint or credentials".to_string(),
            ));
        }

        let content = tokio::time::timeout(self.timeout, self.waypoints.fetch_waypoint_file(file_ref))
            .await
            .map_err(|_| {
                DomainError::Transport(format!("no response within {} ms", self.timeout.as_millis()))
            })??;

        if content.trim().is_empty() {
            return Err(DomainError::ShapeValidation(format!(
                "waypoint file '{}' is empty",
                file_ref
            )));
        }
        Ok(content)
    }
}
