//! Core domain layer. No external I/O dependencies.
//!
//! Entities, validation rules, bundled fallback data and pure helpers live here.

pub mod calendar_link;
pub mod club;
pub mod dates;
pub mod domains;
pub mod entities;
pub mod errors;
pub mod fallback;
pub mod queries;
pub mod track;
pub mod validation;

pub use calendar_link::CalendarInvite;
pub use club::{ClubInfo, PaceLevel, WeekInfo};
pub use domains::{DataDomain, RoutesDomain, ScheduleDomain, WeatherDomain};
pub use entities::{
    Difficulty, EventCategory, RouteInfo, ScheduleEntry, WaypointDownload, WeatherSnapshot,
};
pub use errors::DomainError;
