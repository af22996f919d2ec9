//! Few-shot intent classification.
//!
//! A labeled corpus is split into chunks, each chunk becomes one few-shot prompt, and at
//! request time every prompt is sent to the backend with the input text. The first word
//! of each completion is a vote; the most voted labels win.

// Internal modules
mod aggregator;
mod chunker;
mod dispatcher;
mod engine;
mod extractor;
mod prompt;

// Public exports
pub use aggregator::{aggregate_votes, Prediction, DEFAULT_TOP_K};
pub use chunker::{chunk_examples, Chunks};
pub use dispatcher::{CompletionDispatcher, RawCompletion};
pub(crate) use dispatcher::default_concurrency;
pub use engine::IntentClassifier;
pub use extractor::extract_label;
pub use prompt::{
    FewShotPrompt, FewShotTemplate, PromptSet, ATIS_PREFIX, ATIS_SUFFIX, EXAMPLE_SEPARATOR,
    INPUT_PLACEHOLDER,
};
