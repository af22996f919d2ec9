use crate::error::IntentError;

/// The first whitespace separated token of a completion, verbatim.
pub fn extract_label(completion: &str) -> Result<String, IntentError> {
    completion
        .split_whitespace()
        .next()
        .map(str::to_owned)
        .ok_or_else(|| IntentError::MalformedCompletion(completion.to_owned()))
}
