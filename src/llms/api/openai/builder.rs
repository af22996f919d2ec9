use super::{OpenAiBackend, OpenAiConfig, DEFAULT_OPENAI_MODEL};
use crate::{
    error::IntentError,
    llms::{
        api::config::{ApiConfig, LlmApiConfigTrait},
        CompletionBackend,
    },
    logging::{LoggingConfig, LoggingConfigTrait},
};

pub struct OpenAiBackendBuilder {
    pub config: OpenAiConfig,
    pub model_id: String,
}

impl Default for OpenAiBackendBuilder {
    fn default() -> Self {
        Self {
            config: Default::default(),
            model_id: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl OpenAiBackendBuilder {
    pub fn model_id<S: Into<String>>(mut self, model_id: S) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn gpt_3_5_turbo(self) -> Self {
        self.model_id("gpt-3.5-turbo")
    }

    pub fn gpt_4_o_mini(self) -> Self {
        self.model_id("gpt-4o-mini")
    }

    pub fn gpt_4_o(self) -> Self {
        self.model_id("gpt-4o")
    }

    pub fn with_org_id<S: Into<String>>(mut self, org_id: S) -> Self {
        self.config = self.config.with_org_id(org_id);
        self
    }

    pub fn with_project_id<S: Into<String>>(mut self, project_id: S) -> Self {
        self.config = self.config.with_project_id(project_id);
        self
    }

    pub fn rate_limit_backoff(mut self, max_elapsed_time: std::time::Duration) -> Self {
        self.config.rate_limit_backoff = max_elapsed_time;
        self
    }

    /// Fails with [`IntentError::InvalidConfiguration`] when no API key can be found.
    pub fn init(self) -> Result<std::sync::Arc<dyn CompletionBackend>, IntentError> {
        Ok(std::sync::Arc::new(OpenAiBackend::new(
            self.config,
            self.model_id,
        )?))
    }
}

impl LlmApiConfigTrait for OpenAiBackendBuilder {
    fn api_base_config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config.api_config
    }

    fn api_config(&self) -> &ApiConfig {
        &self.config.api_config
    }
}

impl LoggingConfigTrait for OpenAiBackendBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.config.logging_config
    }
}
