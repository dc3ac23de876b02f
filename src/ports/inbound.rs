//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the front end drives the providers from here.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive session until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
