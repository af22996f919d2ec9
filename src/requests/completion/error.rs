#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("RequestBuilderError: {0}")]
    RequestBuilderError(String),
    #[error("ClientError: {0}")]
    ClientError(#[from] crate::llms::api::ClientError),
    #[error("Timeout: no response after {0:?}")]
    Timeout(std::time::Duration),
    #[error("ResponseChoicesEmpty: Response had no choices")]
    ResponseChoicesEmpty,
}
