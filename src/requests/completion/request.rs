use super::{error::CompletionError, response::CompletionResponse};
use crate::{llms::CompletionBackend, requests::req_components::RequestConfig};

pub struct CompletionRequest {
    pub start_time: std::time::Instant,
    /// The fully rendered prompt, input text included.
    pub prompt: String,
    pub config: RequestConfig,
    pub backend: std::sync::Arc<dyn CompletionBackend>,
}

impl Clone for CompletionRequest {
    fn clone(&self) -> Self {
        Self {
            start_time: self.start_time,
            prompt: self.prompt.clone(),
            config: self.config.clone(),
            backend: std::sync::Arc::clone(&self.backend),
        }
    }
}

impl CompletionRequest {
    pub fn new(
        backend: std::sync::Arc<dyn CompletionBackend>,
        prompt: String,
        config: RequestConfig,
    ) -> CompletionRequest {
        CompletionRequest {
            start_time: std::time::Instant::now(),
            prompt,
            config,
            backend,
        }
    }

    /// Sends the request once. Exceeding [`RequestConfig::timeout`] is a failure like any other.
    pub async fn request(&mut self) -> crate::Result<CompletionResponse, CompletionError> {
        self.start_time = std::time::Instant::now();
        if !(0.0..=2.0).contains(&self.config.temperature) {
            return Err(CompletionError::RequestBuilderError(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.config.temperature
            )));
        }
        tracing::trace!("{}", self);
        match tokio::time::timeout(self.config.timeout, self.backend.completion(self)).await {
            Err(_) => {
                let e = CompletionError::Timeout(self.config.timeout);
                tracing::warn!(?e);
                Err(e)
            }
            Ok(Err(e)) => {
                tracing::warn!(?e);
                Err(e)
            }
            Ok(Ok(res)) => {
                tracing::debug!(elapsed = ?self.start_time.elapsed(), "{}", res);
                Ok(res)
            }
        }
    }
}

impl std::fmt::Display for CompletionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "CompletionRequest:")?;
        writeln!(f, "  model: {}", self.backend.model_id())?;
        writeln!(f, "  prompt: {:?}", self.prompt)?;
        write!(f, "  config: {}", self.config)
    }
}
