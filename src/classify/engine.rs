use super::{
    aggregator::{aggregate_votes, Prediction},
    chunker::chunk_examples,
    dispatcher::CompletionDispatcher,
    extractor::extract_label,
    prompt::{FewShotTemplate, PromptSet},
};
use crate::{
    config::ClassifierConfig, corpus::LabeledExample, error::IntentError,
    llms::CompletionBackend,
};
use std::sync::Arc;

/// Few-shot intent classifier over a hosted completion backend.
///
/// [`IntentClassifier::prepare`] turns a labeled corpus into a reusable [`PromptSet`];
/// [`IntentClassifier::classify`] votes over one completion per prompt. Holds no per-call state,
/// so one instance and one prompt set can serve concurrent calls.
pub struct IntentClassifier {
    dispatcher: CompletionDispatcher,
    template: FewShotTemplate,
    top_k: usize,
    max_prompt_tokens: Option<usize>,
}

impl IntentClassifier {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: &ClassifierConfig) -> Self {
        Self {
            dispatcher: CompletionDispatcher::new(backend)
                .request_config(config.request.clone())
                .max_concurrency(config.max_concurrency),
            template: FewShotTemplate::default(),
            top_k: config.top_k,
            max_prompt_tokens: config.max_prompt_tokens,
        }
    }

    pub fn with_template(mut self, template: FewShotTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn dispatcher(&self) -> &CompletionDispatcher {
        &self.dispatcher
    }

    /// Chunks the examples and builds one prompt per chunk.
    pub fn prepare(
        &self,
        examples: &[LabeledExample],
        chunk_size: usize,
    ) -> Result<PromptSet, IntentError> {
        let prompts = chunk_examples(examples, chunk_size)?
            .map(|chunk| self.template.build(chunk))
            .collect::<Result<Vec<_>, _>>()?;
        let prompt_set = PromptSet::new(prompts, chunk_size);
        crate::info!(
            examples = examples.len(),
            chunk_size,
            prompts = prompt_set.len(),
            "prepared prompt set"
        );

        if let Some(max_prompt_tokens) = self.max_prompt_tokens {
            for (index, count) in prompt_set.token_counts().into_iter().enumerate() {
                if let Some(count) = count.filter(|c| *c > max_prompt_tokens) {
                    crate::warn!(
                        index,
                        tokens = count,
                        max_prompt_tokens,
                        "prompt exceeds token budget, consider a smaller chunk size"
                    );
                }
            }
        }
        Ok(prompt_set)
    }

    /// Up to `top_k` labels, most voted first.
    ///
    /// Completions without a label are dropped from the vote; if none has one the result is
    /// empty. Any backend failure fails the whole call.
    pub async fn classify(
        &self,
        prompt_set: &PromptSet,
        input_text: &str,
    ) -> Result<Vec<Prediction>, IntentError> {
        let start_time = std::time::Instant::now();
        let completions = self.dispatcher.dispatch(prompt_set, input_text).await?;

        let labels: Vec<String> = completions
            .iter()
            .filter_map(|completion| match extract_label(&completion.content) {
                Ok(label) => Some(label),
                Err(e) => {
                    crate::warn!(prompt_index = completion.prompt_index, error = %e, "dropping vote");
                    None
                }
            })
            .collect();

        let predictions = aggregate_votes(&labels, self.top_k);
        crate::info!(
            elapsed = ?start_time.elapsed(),
            prompts = prompt_set.len(),
            votes = labels.len(),
            labels = ?predictions.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
            "classified input"
        );
        Ok(predictions)
    }

    /// Whether the backend has its credentials. No request is made.
    pub fn is_ready(&self) -> bool {
        self.dispatcher.backend().is_ready()
    }
}
