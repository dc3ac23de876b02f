//! Application use cases. Orchestrate domain logic via ports.

pub mod provider;
pub mod route_catalog;
pub mod week_info;

pub use provider::{DEFAULT_FETCH_TIMEOUT, ProviderState, ResilientProvider};
pub use route_catalog::RouteCatalog;
pub use week_info::WeekInfoService;
