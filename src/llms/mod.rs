// Public modules
pub mod api;

// Internal imports
use crate::requests::{CompletionError, CompletionRequest, CompletionResponse};

// Public exports
pub use api::{
    generic_openai::{GenericApiBackend, GenericApiBackendBuilder, GenericApiConfig},
    openai::{builder::OpenAiBackendBuilder, OpenAiBackend, OpenAiConfig},
    ApiConfig, ApiError, ClientError, LlmApiConfigTrait,
};

/// A hosted text completion service. Implementations must be safe to share across
/// concurrent classification calls.
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn completion(
        &self,
        request: &CompletionRequest,
    ) -> crate::Result<CompletionResponse, CompletionError>;

    fn model_id(&self) -> &str;

    /// True when the backend has what it needs to serve requests.
    fn is_ready(&self) -> bool {
        true
    }
}
