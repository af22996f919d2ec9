use super::prompt::{FewShotPrompt, PromptSet};
use crate::{
    error::IntentError,
    llms::CompletionBackend,
    requests::{CompletionRequest, RequestConfig, RequestConfigTrait},
};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;

/// A backend's answer to one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    /// Position of the prompt in its [`PromptSet`].
    pub prompt_index: usize,
    pub content: String,
}

/// Sends every prompt of a [`PromptSet`] to the backend concurrently.
pub struct CompletionDispatcher {
    backend: Arc<dyn CompletionBackend>,
    pub config: RequestConfig,
    max_concurrency: usize,
}

impl CompletionDispatcher {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            config: RequestConfig::default(),
            max_concurrency: default_concurrency(),
        }
    }

    /// Upper bound on requests in flight for one dispatch. Clamped to at least 1.
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn request_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    pub fn backend(&self) -> &Arc<dyn CompletionBackend> {
        &self.backend
    }

    /// One completion per prompt, returned in prompt order whatever order they arrive in.
    ///
    /// All or nothing: the first failed request fails the call with
    /// [`IntentError::BackendUnavailable`] and requests still in flight are dropped.
    pub async fn dispatch(
        &self,
        prompts: &PromptSet,
        input_text: &str,
    ) -> Result<Vec<RawCompletion>, IntentError> {
        futures::stream::iter(prompts.iter().enumerate())
            .map(|(prompt_index, prompt)| self.complete(prompt_index, prompt, input_text))
            .buffered(self.max_concurrency)
            .try_collect()
            .await
    }

    async fn complete(
        &self,
        prompt_index: usize,
        prompt: &FewShotPrompt,
        input_text: &str,
    ) -> Result<RawCompletion, IntentError> {
        let mut request = CompletionRequest::new(
            Arc::clone(&self.backend),
            prompt.render(input_text),
            self.config.clone(),
        );
        match request.request().await {
            Ok(res) => {
                crate::debug!(prompt_index, content = ?res.content, "completion");
                Ok(RawCompletion {
                    prompt_index,
                    content: res.content,
                })
            }
            Err(e) => {
                crate::error!(prompt_index, error = %e, "completion request failed");
                Err(IntentError::BackendUnavailable(e))
            }
        }
    }
}

impl RequestConfigTrait for CompletionDispatcher {
    fn config(&mut self) -> &mut RequestConfig {
        &mut self.config
    }
}

pub(crate) fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
