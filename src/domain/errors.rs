//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// No credentials/endpoint for the upstream. Expected offline mode, not a fault.
    #[error("Source not configured: {0}")]
    ConfigurationMissing(String),

    /// Network failure, non-success HTTP status or timeout.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Payload was received but does not match the domain schema.
    #[error("Shape validation failed: {0}")]
    ShapeValidation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl DomainError {
    /// True for the outcomes that make a provider fall back to its static dataset.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ConfigurationMissing(_)
                | DomainError::Transport(_)
                | DomainError::ShapeValidation(_)
        )
    }
}
