use crate::requests::{
    CompletionError, CompletionFinishReason, CompletionRequest, CompletionResponse, TokenUsage,
};
use serde::{Deserialize, Serialize};

/// Body of a `/chat/completions` request. The rendered few-shot prompt is sent as a single user message.
#[derive(Clone, Serialize, Debug, Deserialize)]
pub struct OpenAiCompletionRequest {
    /// ID of the model to use.
    pub model: String,
    pub messages: Vec<CompletionRequestMessage>,
    /// The maximum number of tokens to generate in the chat completion.
    pub max_tokens: u64,
    /// Sampling temperature between 0 and 2.
    pub temperature: f32,
}

impl OpenAiCompletionRequest {
    pub fn new(req: &CompletionRequest) -> crate::Result<Self, CompletionError> {
        if req.prompt.is_empty() {
            return Err(CompletionError::RequestBuilderError(
                "Prompt is empty".to_string(),
            ));
        }
        Ok(OpenAiCompletionRequest {
            model: req.backend.model_id().to_owned(),
            messages: vec![CompletionRequestMessage {
                role: "user".to_string(),
                content: req.prompt.clone(),
            }],
            max_tokens: req.config.requested_response_tokens,
            temperature: req.config.temperature,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompletionRequestMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub index: u32,
    pub message: OpenAiResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiResponseMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    pub(crate) fn new_from_openai(
        res: OpenAiCompletionResponse,
    ) -> crate::Result<Self, CompletionError> {
        let choice = res
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::ResponseChoicesEmpty)?;
        let finish_reason = CompletionFinishReason::from_openai(choice.finish_reason.as_deref());
        Ok(CompletionResponse {
            id: res.id,
            content: choice.message.content.unwrap_or_default(),
            finish_reason,
            token_usage: res.usage.unwrap_or_default(),
        })
    }
}
