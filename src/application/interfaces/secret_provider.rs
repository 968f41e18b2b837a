use async_trait::async_trait;

use crate::domain::DomainError;

/// Resolves a named secret at call time.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Returns the current value of `name`, or [`DomainError::Configuration`]
    /// when it is not set.
    async fn resolve(&self, name: &str) -> Result<String, DomainError>;
}
