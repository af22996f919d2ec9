pub use crate::{
    classify::{
        aggregate_votes, chunk_examples, extract_label, CompletionDispatcher, FewShotPrompt,
        FewShotTemplate, IntentClassifier, Prediction, PromptSet, RawCompletion, ATIS_PREFIX,
        ATIS_SUFFIX,
    },
    config::ClassifierConfig,
    corpus::{parse_corpus, read_corpus, LabeledExample},
    error::IntentError,
    evaluate::{evaluate, score, EvaluationMetrics},
    llms::{CompletionBackend, LlmApiConfigTrait},
    logging::{LoggingConfig, LoggingConfigTrait},
    requests::{
        CompletionError, CompletionFinishReason, CompletionRequest, CompletionResponse,
        RequestConfig, RequestConfigTrait,
    },
    IntentClient,
};
#[cfg(test)]
pub use serial_test::serial;
