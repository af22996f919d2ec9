use serde::Deserialize;

pub struct CompletionResponse {
    /// A unique identifier for the chat completion.
    pub id: String,
    /// The generated completion. May be empty; parsing a label out of it is the caller's job.
    pub content: String,
    pub finish_reason: CompletionFinishReason,
    pub token_usage: TokenUsage,
}

impl std::fmt::Display for CompletionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "CompletionResponse:")?;
        writeln!(f, "    content: {:?}", self.content)?;
        writeln!(f, "    finish_reason: {}", self.finish_reason)?;
        write!(f, "    token_usage: {}", self.token_usage)
    }
}

#[derive(Debug, PartialEq)]
pub enum CompletionFinishReason {
    /// The model finished its answer on its own.
    Eos,
    /// The completion finished because the model reached the maximum token limit.
    StopLimit,
    /// Any other reason the service reported, e.g. a content filter.
    Other(String),
}

impl CompletionFinishReason {
    pub(crate) fn from_openai(reason: Option<&str>) -> Self {
        match reason {
            None | Some("stop") => CompletionFinishReason::Eos,
            Some("length") => CompletionFinishReason::StopLimit,
            Some(other) => CompletionFinishReason::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for CompletionFinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionFinishReason::Eos => write!(f, "Eos"),
            CompletionFinishReason::StopLimit => write!(f, "StopLimit"),
            CompletionFinishReason::Other(reason) => write!(f, "Other({})", reason),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl std::fmt::Display for TokenUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "        prompt_tokens: {}", self.prompt_tokens)?;
        writeln!(f, "        completion_tokens: {}", self.completion_tokens)?;
        write!(f, "        total_tokens: {}", self.total_tokens)
    }
}
