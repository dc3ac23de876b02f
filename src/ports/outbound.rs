//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DataDomain, DomainError};

/// External source for one data domain (calendar, route catalog, weather).
#[async_trait::async_trait]
pub trait DataSource<D: DataDomain>: Send + Sync {
    /// Whether credentials/endpoint are present. When false the provider does not call `fetch`.
    fn is_configured(&self) -> bool;

    /// Fetch and map the upstream payload. Shape validation happens in the provider.
    async fn fetch(&self) -> Result<D::Value, DomainError>;
}

/// Source of a route's GPX file content.
#[async_trait::async_trait]
pub trait WaypointSource: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Download the file named `file_ref` (e.g. "abers.gpx") as text.
    async fn fetch_waypoint_file(&self, file_ref: &str) -> Result<String, DomainError>;
}
