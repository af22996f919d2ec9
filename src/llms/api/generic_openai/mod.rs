// Internal imports
use super::{
    client::ApiClient,
    config::{ApiConfig, ApiConfigTrait, LlmApiConfigTrait},
    openai::completion::{OpenAiCompletionRequest, OpenAiCompletionResponse},
};
use crate::{
    error::IntentError,
    llms::CompletionBackend,
    logging::{LoggingConfig, LoggingConfigTrait},
    requests::{CompletionError, CompletionRequest, CompletionResponse},
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, Secret};

/// Any host speaking the OpenAI chat completions protocol, e.g. a local inference server.
pub struct GenericApiBackend {
    pub(crate) client: ApiClient<GenericApiConfig>,
    pub model_id: String,
}

impl GenericApiBackend {
    pub fn new(mut config: GenericApiConfig, model_id: String) -> Result<Self, IntentError> {
        if config.api_config.host.trim().is_empty() {
            return Err(IntentError::InvalidConfiguration(
                "api host is empty".to_string(),
            ));
        }
        if model_id.trim().is_empty() {
            return Err(IntentError::InvalidConfiguration(
                "model id is empty".to_string(),
            ));
        }
        config.logging_config.load_logger();
        // Local servers commonly run without a key.
        if let Ok(api_key) = config.api_config.load_api_key() {
            config.api_config.api_key = Some(api_key);
        }
        let rate_limit_backoff = config.rate_limit_backoff;
        Ok(Self {
            client: ApiClient::new_with_backoff(config, rate_limit_backoff),
            model_id,
        })
    }
}

#[async_trait::async_trait]
impl CompletionBackend for GenericApiBackend {
    async fn completion(
        &self,
        request: &CompletionRequest,
    ) -> crate::Result<CompletionResponse, CompletionError> {
        let res: OpenAiCompletionResponse = self
            .client
            .post(
                &self.client.config.completion_path,
                OpenAiCompletionRequest::new(request)?,
            )
            .await?;
        CompletionResponse::new_from_openai(res)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[derive(Clone, Debug)]
pub struct GenericApiConfig {
    pub api_config: ApiConfig,
    pub logging_config: LoggingConfig,
    pub completion_path: String,
    /// Upper bound on time spent backing off from HTTP 429 responses.
    pub rate_limit_backoff: std::time::Duration,
}

impl Default for GenericApiConfig {
    fn default() -> Self {
        Self {
            api_config: ApiConfig {
                host: Default::default(),
                port: None,
                api_key: None,
                api_key_env_var: "GENERIC_API_KEY".to_string(),
            },
            logging_config: LoggingConfig {
                logger_name: "generic".to_string(),
                ..Default::default()
            },
            completion_path: "/chat/completions".to_string(),
            rate_limit_backoff: super::client::DEFAULT_RATE_LIMIT_BACKOFF,
        }
    }
}

impl GenericApiConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn completion_path<S: Into<String>>(mut self, path: S) -> Self {
        self.completion_path = path.into();
        self
    }
}

impl ApiConfigTrait for GenericApiConfig {
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = self.api_key() {
            if let Ok(header_value) =
                HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            {
                headers.insert(AUTHORIZATION, header_value);
            } else {
                crate::error!("Failed to create header value from authorization value");
            }
        }

        headers
    }

    fn url(&self, path: &str) -> String {
        let host = &self.api_config.host;
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        match &self.api_config.port {
            Some(port) => format!("{}:{}{}", base, port, path),
            None => format!("{}{}", base, path),
        }
    }

    fn api_key(&self) -> &Option<Secret<String>> {
        &self.api_config.api_key
    }
}

#[derive(Default)]
pub struct GenericApiBackendBuilder {
    pub config: GenericApiConfig,
    pub model_id: String,
}

impl GenericApiBackendBuilder {
    pub fn model_id<S: Into<String>>(mut self, model_id: S) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn completion_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config = self.config.completion_path(path);
        self
    }

    pub fn rate_limit_backoff(mut self, max_elapsed_time: std::time::Duration) -> Self {
        self.config.rate_limit_backoff = max_elapsed_time;
        self
    }

    pub fn init(self) -> Result<std::sync::Arc<dyn CompletionBackend>, IntentError> {
        Ok(std::sync::Arc::new(GenericApiBackend::new(
            self.config,
            self.model_id,
        )?))
    }
}

impl LlmApiConfigTrait for GenericApiBackendBuilder {
    fn api_base_config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config.api_config
    }

    fn api_config(&self) -> &ApiConfig {
        &self.config.api_config
    }
}

impl LoggingConfigTrait for GenericApiBackendBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.config.logging_config
    }
}
