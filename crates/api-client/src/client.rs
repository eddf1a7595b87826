//! HTTP plumbing shared by the endpoint APIs

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, TableApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// PostgREST preference header
const PREFER_HEADER: &str = "Prefer";

/// Supabase client with request correlation and read retries
///
/// Every request carries the anon key as `apikey` and a fresh `X-Request-ID`.
/// The bearer token is the caller's access token when one is given, otherwise
/// the anon key.
#[derive(Clone)]
pub struct PetfycoClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl PetfycoClient {
    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("petfyco-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(ref key) = config.anon_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::config("anon key contains invalid header characters"))?;
            default_headers.insert(APIKEY_HEADER, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access auth endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access a REST table
    #[must_use]
    pub fn from(&self, table: impl Into<String>) -> TableApi {
        TableApi::new(self.clone(), table)
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// GET and decode JSON, retrying transient failures
    ///
    /// All attempts and the delays between them share the configured timeout,
    /// so a failing service is given up on within that budget.
    #[instrument(skip(self, bearer), fields(request_id = tracing::field::Empty))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str, bearer: Option<&str>) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let retry_config = &self.config.retry;
        let budget = self.config.timeout;
        let started = Instant::now();
        let mut last_error: Option<ApiError> = None;
        let mut attempts = 0;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                if started.elapsed() + delay >= budget {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt,
                        elapsed_ms = started.elapsed().as_millis(),
                        "Timeout budget spent, not retrying"
                    );
                    break;
                }
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            attempts += 1;
            let remaining = budget.saturating_sub(started.elapsed());
            let request = self
                .request(Method::GET, url, bearer, &request_id)
                .timeout(remaining);
            match self.send_json(request).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < retry_config.max_attempts => {
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Request failed, will retry"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// POST a JSON body and decode a JSON response (single attempt)
    #[instrument(skip(self, body, bearer), fields(request_id = tracing::field::Empty))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let request = self.request(Method::POST, url, bearer, &request_id).json(body);
        self.send_json(request).await
    }

    /// POST a JSON body and ignore the response body (single attempt)
    ///
    /// Used for inserts with `Prefer: return=minimal` and for logout, both of
    /// which answer with an empty body.
    #[instrument(skip(self, body, bearer), fields(request_id = tracing::field::Empty))]
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
        prefer: Option<&str>,
    ) -> ApiResult<()> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let mut request = self.request(Method::POST, url, bearer, &request_id).json(body);
        if let Some(prefer) = prefer {
            request = request.header(PREFER_HEADER, prefer);
        }

        let response = self.send(request).await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Build a request with correlation id and authorization
    fn request(
        &self,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        request_id: &str,
    ) -> RequestBuilder {
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if let Some(token) = bearer.or(self.config.anon_key.as_deref()) {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    /// Send a request, mapping client-side timeouts
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let start = Instant::now();
        let result = request.send().await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                debug!(
                    status = response.status().as_u16(),
                    elapsed_ms = elapsed.as_millis(),
                    "Response received"
                );
                Ok(response)
            }
            Err(e) if e.is_timeout() => {
                warn!(elapsed_ms = elapsed.as_millis(), "Request timed out");
                Err(ApiError::Timeout(self.config.timeout))
            }
            Err(e) => Err(ApiError::Request(e)),
        }
    }

    /// Send and decode a JSON response
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Json)
    }

    /// Turn non-2xx responses into errors carrying the service's message
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %error, "Service returned an error");
        Err(error)
    }
}
