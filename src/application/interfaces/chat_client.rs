use async_trait::async_trait;

use crate::domain::{ChatMessage, Completion, CompletionOptions, DomainError};

/// Sends a conversation to an LLM completion API and returns its output.
///
/// Implementors own transport, authentication and vendor-specific request
/// shapes. One call maps to exactly one outbound request: no retries, no
/// streaming.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one completion over the ordered `messages`.
    ///
    /// Fails with [`DomainError::Upstream`] when the provider answers with a
    /// non-success status.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<Completion, DomainError>;

    fn model_name(&self) -> &str;
}
