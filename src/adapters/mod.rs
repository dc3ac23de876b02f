//! Infrastructure adapters. Implement outbound ports and drive the inbound one.
//!
//! Groupware, weather service, terminal UI. Map errors to DomainError.

pub mod nextcloud;
pub mod ui;
pub mod weather;
