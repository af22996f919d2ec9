use crate::requests::CompletionError;

#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// Bad chunk size, missing credentials or an otherwise unusable setting. Never retried.
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),
    /// Any backend request failed. Fails the whole classification call.
    #[error("BackendUnavailable: {0}")]
    BackendUnavailable(#[from] CompletionError),
    /// A single completion yielded no label. Absorbed by the classifier.
    #[error("MalformedCompletion: {0:?}")]
    MalformedCompletion(String),
    #[error("CorpusError: {0}")]
    Corpus(String),
}

impl IntentError {
    /// Exit code used by the command line entry point.
    pub fn exit_code(&self) -> i32 {
        match self {
            IntentError::InvalidConfiguration(_) | IntentError::Corpus(_) => 2,
            IntentError::BackendUnavailable(_) => 3,
            IntentError::MalformedCompletion(_) => 4,
        }
    }
}

impl From<csv::Error> for IntentError {
    fn from(e: csv::Error) -> Self {
        IntentError::Corpus(e.to_string())
    }
}
