//! Shape validation for fetched data. Fallback datasets go through the same rules.

use crate::domain::{DomainError, RouteInfo, ScheduleEntry, WeatherSnapshot};
use std::collections::HashSet;

/// Plausible bounds for an air temperature reading, in °C.
const TEMPERATURE_RANGE_C: std::ops::RangeInclusive<f64> = -90.0..=60.0;

fn invalid(msg: impl Into<String>) -> DomainError {
    DomainError::ShapeValidation(msg.into())
}

fn require_text(value: &str, field: &str, id: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("record '{}': missing {}", id, field)));
    }
    Ok(())
}

pub fn validate_schedule_entry(entry: &ScheduleEntry) -> Result<(), DomainError> {
    if entry.id.trim().is_empty() {
        return Err(invalid("schedule entry without id"));
    }
    require_text(&entry.title, "title", &entry.id)
}

pub fn validate_route(route: &RouteInfo) -> Result<(), DomainError> {
    if route.id.trim().is_empty() {
        return Err(invalid("route without id"));
    }
    require_text(&route.name, "name", &route.id)?;
    if !route.distance_km.is_finite() || route.distance_km <= 0.0 {
        return Err(invalid(format!(
            "route '{}': distance must be > 0 km, got {}",
            route.id, route.distance_km
        )));
    }
    if !route.elevation_m.is_finite() || route.elevation_m < 0.0 {
        return Err(invalid(format!(
            "route '{}': elevation must be >= 0 m, got {}",
            route.id, route.elevation_m
        )));
    }
    Ok(())
}

pub fn validate_weather(snapshot: &WeatherSnapshot) -> Result<(), DomainError> {
    if !TEMPERATURE_RANGE_C.contains(&snapshot.temperature_c) {
        return Err(invalid(format!(
            "temperature out of range: {}",
            snapshot.temperature_c
        )));
    }
    require_text(&snapshot.condition, "condition", "weather")?;
    require_text(&snapshot.icon_token, "icon token", "weather")
}

/// Validates every record and checks that ids are unique within the collection.
pub fn validate_collection<T>(
    items: &[T],
    id_of: impl Fn(&T) -> &str,
    validate_one: impl Fn(&T) -> Result<(), DomainError>,
) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        validate_one(item)?;
        let id = id_of(item);
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate id '{}'", id)));
        }
    }
    Ok(())
}
