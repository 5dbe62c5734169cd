use async_trait::async_trait;

use crate::domain::{CompletionReply, CompletionRequest, DomainError};

/// Sends one request to a text-completion service and returns its reply.
///
/// Implementors own transport, authentication and wire decoding; the
/// returned reply has already been checked to carry a `content` list.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn create_message(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionReply, DomainError>;

    /// Short name for logging.
    fn provider_name(&self) -> &str;
}
