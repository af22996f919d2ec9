use crate::{
    classify::DEFAULT_TOP_K,
    error::IntentError,
    requests::{RequestConfig, RequestConfigTrait},
};
use std::path::PathBuf;

pub const DEFAULT_CHUNK_SIZE: usize = 200;
pub const DEFAULT_EVAL_LIMIT: usize = 300;

pub const TRAIN_DATA_ENV_VAR: &str = "TRAIN_DATA_FILE_PATH";
pub const TEST_DATA_ENV_VAR: &str = "TEST_DATA_FILE_PATH";
pub const CHUNK_SIZE_ENV_VAR: &str = "INTENT_CHUNK_SIZE";
pub const MODEL_ENV_VAR: &str = "INTENT_MODEL_NAME";
pub const MAX_CONCURRENCY_ENV_VAR: &str = "INTENT_MAX_CONCURRENCY";

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    /// Examples per few-shot prompt.
    ///
    /// Defaults to `200`.
    pub chunk_size: usize,
    /// Number of ranked labels returned per classification.
    ///
    /// Defaults to `3`.
    pub top_k: usize,
    /// Completion requests in flight per classification.
    ///
    /// Defaults to the number of available CPUs.
    pub max_concurrency: usize,
    /// Warn when a prompt is larger than this many `cl100k_base` tokens. `None` disables the check.
    pub max_prompt_tokens: Option<usize>,
    pub request: RequestConfig,
    /// Overrides the backend's default model.
    pub model_id: Option<String>,
    pub train_data_path: Option<PathBuf>,
    pub test_data_path: Option<PathBuf>,
    /// Number of test examples scored by an evaluation run.
    ///
    /// Defaults to `300`.
    pub eval_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_k: DEFAULT_TOP_K,
            max_concurrency: crate::classify::default_concurrency(),
            max_prompt_tokens: None,
            request: RequestConfig::default(),
            model_id: None,
            train_data_path: None,
            test_data_path: None,
            eval_limit: DEFAULT_EVAL_LIMIT,
        }
    }
}

impl ClassifierConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Defaults overridden by `.env` and the process environment.
    pub fn from_env() -> Result<Self, IntentError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(path) = dotenvy::var(TRAIN_DATA_ENV_VAR) {
            config.train_data_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = dotenvy::var(TEST_DATA_ENV_VAR) {
            config.test_data_path = Some(PathBuf::from(path));
        }
        if let Ok(model_id) = dotenvy::var(MODEL_ENV_VAR) {
            config.model_id = Some(model_id);
        }
        if let Some(chunk_size) = parse_env_usize(CHUNK_SIZE_ENV_VAR)? {
            config = config.chunk_size(chunk_size)?;
        }
        if let Some(max_concurrency) = parse_env_usize(MAX_CONCURRENCY_ENV_VAR)? {
            config = config.max_concurrency(max_concurrency);
        }
        crate::debug!(?config, "loaded classifier config");
        Ok(config)
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Result<Self, IntentError> {
        if chunk_size == 0 {
            return Err(IntentError::InvalidConfiguration(
                "chunk size must be at least 1".to_string(),
            ));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn max_prompt_tokens(mut self, max_prompt_tokens: usize) -> Self {
        self.max_prompt_tokens = Some(max_prompt_tokens);
        self
    }

    pub fn eval_limit(mut self, eval_limit: usize) -> Self {
        self.eval_limit = eval_limit;
        self
    }
}

impl RequestConfigTrait for ClassifierConfig {
    fn config(&mut self) -> &mut RequestConfig {
        &mut self.request
    }
}

fn parse_env_usize(name: &str) -> Result<Option<usize>, IntentError> {
    match dotenvy::var(name) {
        Ok(value) => value.trim().parse::<usize>().map(Some).map_err(|e| {
            IntentError::InvalidConfiguration(format!("{} must be a positive integer: {}", name, e))
        }),
        Err(_) => Ok(None),
    }
}
