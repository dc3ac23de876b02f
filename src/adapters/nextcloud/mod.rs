//! Nextcloud adapters. Calendar (CalDAV), route catalog and GPX files (WebDAV).

pub mod calendar;
pub mod client;
pub mod files;
pub mod ical;

pub use calendar::NextcloudCalendar;
pub use client::NextcloudClient;
pub use files::NextcloudRouteFiles;
