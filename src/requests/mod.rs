// Internal modules
mod completion;
mod req_components;

// Public exports
pub use completion::{
    CompletionError, CompletionFinishReason, CompletionRequest, CompletionResponse, TokenUsage,
};
pub use req_components::{RequestConfig, RequestConfigTrait};
