//! Output of the `intent_cli` subcommands.

use crate::{
    classify::{IntentClassifier, Prediction, PromptSet},
    error::IntentError,
    evaluate::EvaluationMetrics,
    llms::CompletionBackend,
};

pub const READY: &str = "OK";

/// [`READY`] when the backend can serve requests, otherwise `InvalidConfiguration`.
pub fn ready_report(backend: &dyn CompletionBackend) -> Result<&'static str, IntentError> {
    if backend.is_ready() {
        Ok(READY)
    } else {
        Err(IntentError::InvalidConfiguration(format!(
            "backend for {} is not ready",
            backend.model_id()
        )))
    }
}

/// `{"intents":[{"label":..},..]}`, most voted first.
pub fn intents_json(predictions: &[Prediction]) -> serde_json::Value {
    serde_json::json!({ "intents": predictions })
}

pub async fn classify_json(
    classifier: &IntentClassifier,
    prompt_set: &PromptSet,
    text: &str,
) -> Result<serde_json::Value, IntentError> {
    let predictions = classifier.classify(prompt_set, text).await?;
    Ok(intents_json(&predictions))
}

pub fn metrics_json(metrics: &EvaluationMetrics) -> serde_json::Value {
    serde_json::json!(metrics)
}
