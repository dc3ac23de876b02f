//! ccb-data: cycling club data layer with resilient fetch-or-fallback providers,
//! laid out as a hexagon (domain, ports, use cases, adapters).

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
