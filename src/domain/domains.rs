//! Data domains served by the resilient provider.
//!
//! A domain binds a value type to its validation rule and its bundled fallback.

use crate::domain::fallback::{fallback_routes, fallback_schedule, fallback_weather};
use crate::domain::validation::{
    validate_collection, validate_route, validate_schedule_entry, validate_weather,
};
use crate::domain::{DomainError, RouteInfo, ScheduleEntry, WeatherSnapshot};
use std::fmt::Debug;

pub trait DataDomain: Send + Sync + 'static {
    type Value: Clone + Debug + Send + Sync + 'static;

    /// Short name used in log records.
    const NAME: &'static str;

    fn validate(value: &Self::Value) -> Result<(), DomainError>;

    fn fallback() -> Self::Value;

    /// Number of records, for logging.
    fn len(value: &Self::Value) -> usize;
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleDomain;

impl DataDomain for ScheduleDomain {
    type Value = Vec<ScheduleEntry>;
    const NAME: &'static str = "schedule";

    fn validate(value: &Self::Value) -> Result<(), DomainError> {
        validate_collection(value, |e| e.id.as_str(), validate_schedule_entry)
    }

    fn fallback() -> Self::Value {
        fallback_schedule()
    }

    fn len(value: &Self::Value) -> usize {
        value.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoutesDomain;

impl DataDomain for RoutesDomain {
    type Value = Vec<RouteInfo>;
    const NAME: &'static str = "routes";

    fn validate(value: &Self::Value) -> Result<(), DomainError> {
        validate_collection(value, |r| r.id.as_str(), validate_route)
    }

    fn fallback() -> Self::Value {
        fallback_routes()
    }

    fn len(value: &Self::Value) -> usize {
        value.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherDomain;

impl DataDomain for WeatherDomain {
    type Value = WeatherSnapshot;
    const NAME: &'static str = "weather";

    fn validate(value: &Self::Value) -> Result<(), DomainError> {
        validate_weather(value)
    }

    fn fallback() -> Self::Value {
        fallback_weather()
    }

    fn len(_value: &Self::Value) -> usize {
        1
    }
}
