use super::{
    config::ApiConfigTrait,
    error::{map_deserialization_error, map_serialization_error, ClientError, WrappedError},
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

pub const DEFAULT_RATE_LIMIT_BACKOFF: std::time::Duration = std::time::Duration::from_secs(60);

/// Shared by every request a backend makes. `reqwest::Client` pools connections and is cheap to clone.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient<C: ApiConfigTrait> {
    http_client: reqwest::Client,
    pub config: C,
    pub backoff: backoff::ExponentialBackoff,
}

impl<C: ApiConfigTrait> ApiClient<C> {
    pub fn new_with_backoff(config: C, max_elapsed_time: std::time::Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
            backoff: backoff::ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(max_elapsed_time))
                .build(),
        }
    }

    /// Make a POST request to {path} and deserialize the response body
    pub(crate) async fn post<I, O>(&self, path: &str, request: I) -> Result<O, ClientError>
    where
        I: Serialize + std::fmt::Debug,
        O: DeserializeOwned,
    {
        let request_maker = || async {
            let serialized_request =
                serde_json::to_string(&request).map_err(map_serialization_error)?;
            crate::trace!("Serialized request: {}", serialized_request);
            let request_builder = self
                .http_client
                .post(self.config.url(path))
                .headers(self.config.headers())
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(serialized_request);
            Ok(request_builder.build()?)
        };
        self.execute(request_maker).await
    }

    /// Execute a HTTP request and retry on rate limit
    ///
    /// request_maker rebuilds the request for every attempt, since a sent
    /// reqwest::Request can't be reused.
    async fn execute_raw<M, Fut>(&self, request_maker: M) -> Result<Bytes, ClientError>
    where
        M: Fn() -> Fut,
        Fut: core::future::Future<Output = Result<reqwest::Request, ClientError>>,
    {
        let client = self.http_client.clone();

        backoff::future::retry(self.backoff.clone(), || async {
            let request = request_maker().await.map_err(backoff::Error::Permanent)?;
            let response = client
                .execute(request)
                .await
                .map_err(ClientError::Reqwest)
                .map_err(backoff::Error::Permanent)?;

            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(ClientError::Reqwest)
                .map_err(backoff::Error::Permanent)?;

            if status.is_success() {
                return Ok(bytes);
            }

            let wrapped_error = match serde_json::from_slice::<WrappedError>(bytes.as_ref()) {
                Ok(wrapped_error) => wrapped_error,
                Err(_) => {
                    return Err(backoff::Error::Permanent(ClientError::HttpStatus {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(bytes.as_ref()).into_owned(),
                    }))
                }
            };

            // 429 is also returned for "You exceeded your current quota", which won't clear up.
            if status.as_u16() == 429
                && wrapped_error.error.r#type.as_deref() != Some("insufficient_quota")
            {
                tracing::warn!("Rate limited: {}", wrapped_error.error.message);
                Err(backoff::Error::Transient {
                    err: ClientError::ApiError(wrapped_error.error),
                    retry_after: None,
                })
            } else {
                Err(backoff::Error::Permanent(ClientError::ApiError(
                    wrapped_error.error,
                )))
            }
        })
        .await
    }

    async fn execute<O, M, Fut>(&self, request_maker: M) -> Result<O, ClientError>
    where
        O: DeserializeOwned,
        M: Fn() -> Fut,
        Fut: core::future::Future<Output = Result<reqwest::Request, ClientError>>,
    {
        let bytes = self.execute_raw(request_maker).await?;
        crate::trace!("Serialized response: {}", String::from_utf8_lossy(&bytes));
        serde_json::from_slice(&bytes).map_err(|e| map_deserialization_error(e, &bytes))
    }
}
