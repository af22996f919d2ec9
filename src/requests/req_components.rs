use std::time::Duration;

pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_RESPONSE_TOKENS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct RequestConfig {
    /// Controls the randomness of the model's output.
    ///
    /// Accepts values between 0.0 and 2.0. Classification wants a near deterministic answer,
    /// so the default is `0.0`. Even at `0.0` hosted models are not guaranteed to repeat
    /// themselves, which is why labels are voted on across prompts.
    ///
    /// Defaults to `0.0`.
    pub temperature: f32,
    /// Maximum number of tokens the model may generate.
    ///
    /// Only a label is expected back, so this is kept small.
    /// For OpenAI API-compatible LLMs, this corresponds to the 'max_tokens' parameter.
    ///
    /// Defaults to `10`.
    pub requested_response_tokens: u64,
    /// Time allowed for a single completion request, including rate limit backoff.
    ///
    /// A request that exceeds it is reported as [`crate::requests::CompletionError::Timeout`].
    ///
    /// Defaults to 30 seconds.
    pub timeout: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            requested_response_tokens: DEFAULT_RESPONSE_TOKENS,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RequestConfig {
    pub fn new() -> Self {
        Default::default()
    }
}

impl std::fmt::Display for RequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "    temperature: {}", self.temperature)?;
        writeln!(
            f,
            "    requested_response_tokens: {}",
            self.requested_response_tokens
        )?;
        write!(f, "    timeout: {:?}", self.timeout)
    }
}

pub trait RequestConfigTrait {
    fn config(&mut self) -> &mut RequestConfig;

    /// What sampling temperature to use, between 0 and 2.
    /// Values outside of the range reset to the default.
    fn temperature(&mut self, temperature: f32) -> &mut Self {
        match temperature {
            value if (0.0..=2.0).contains(&value) => self.config().temperature = value,
            _ => self.config().temperature = DEFAULT_TEMPERATURE,
        };
        self
    }

    /// Number of tokens to use for the model's output.
    fn max_tokens(&mut self, max_tokens: u64) -> &mut Self {
        self.config().requested_response_tokens = max_tokens.max(1);
        self
    }

    fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.config().timeout = timeout;
        self
    }
}

impl RequestConfigTrait for RequestConfig {
    fn config(&mut self) -> &mut RequestConfig {
        self
    }
}
