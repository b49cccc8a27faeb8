//! Binance Options REST API client implementation.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryDecision, RetryPolicy, Retryable};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use url::Url;

use crate::auth::{
    ClientOrderIdProvider, CountingClientOrderId, Credentials, CredentialsProvider,
    current_time_millis, sign_query,
};
use crate::error::{ApiError, BinanceError};
use crate::rest::endpoints::BINANCE_OPTIONS_TESTNET_URL;
use crate::rest::retry::{FixedInterval, NetworkFailuresOnly};
use crate::types::Params;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
/// Default receive window in milliseconds.
pub const DEFAULT_RECV_WINDOW: u64 = 10_000;
/// Default timeout of a single attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default number of attempts per request.
pub const DEFAULT_MAX_TRIES: u32 = 5;
/// Default pause between attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(3);

/// How a request proves the caller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Security {
    /// Anonymous request
    None,
    /// Request carrying the `X-MBX-APIKEY` header
    ApiKey,
    /// API key header plus `timestamp`, `recvWindow` and `signature` parameters
    Signed,
}

/// A single call to the API, built fresh for every operation.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path, e.g. `/api/v1/order`
    pub path: String,
    /// Query parameters
    pub params: Params,
    /// Authentication level
    pub security: Security,
    /// Receive window override for signed requests
    pub recv_window: Option<u64>,
}

impl ApiRequest {
    /// Create a request for an endpoint.
    pub fn new(method: Method, path: impl Into<String>, security: Security) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            security,
            recv_window: None,
        }
    }

    /// Create an anonymous request.
    pub fn public(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path, Security::None)
    }

    /// Create a request sending the API key header.
    pub fn with_api_key(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path, Security::ApiKey)
    }

    /// Create a signed request.
    pub fn signed(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path, Security::Signed)
    }

    /// Set the query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Override the client's receive window for this request.
    pub fn recv_window(mut self, recv_window: Option<u64>) -> Self {
        self.recv_window = recv_window;
        self
    }
}

/// The Binance Options REST API client.
///
/// The client signs private calls, retries network failures and hands back
/// the venue's JSON documents. Cloning is cheap and clones share the
/// client order id counter.
///
/// # Example
///
/// ```rust,no_run
/// use binance_options_client::rest::OptionsRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OptionsRestClient::new();
///     let time = client.get_server_time().await?;
///     println!("Server time: {}", time.server_time);
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use binance_options_client::auth::StaticCredentials;
/// use binance_options_client::rest::OptionsRestClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = OptionsRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let account = client.get_account_info().await?;
///     println!("Account: {account}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct OptionsRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    client_order_ids: Arc<dyn ClientOrderIdProvider>,
    retry_policy: FixedInterval,
    recv_window: u64,
    max_tries: u32,
}

impl OptionsRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`OptionsRestClient::builder()`] to configure credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> OptionsRestClientBuilder {
        OptionsRestClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The receive window applied to signed requests without an override.
    pub fn recv_window(&self) -> u64 {
        self.recv_window
    }

    /// Number of attempts made per request.
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Generate a new client order id.
    pub fn next_client_order_id(&self) -> String {
        self.client_order_ids.next_client_order_id()
    }

    /// Send a request and return the decoded response body.
    ///
    /// Signed requests get `timestamp` and `recvWindow` added and are signed
    /// before anything goes on the wire. Parameter values are sent as they
    /// are signed, so they must be URL-safe.
    ///
    /// Network failures, including a connection dropped or timed out while
    /// the body is read, are retried up to `max_tries` attempts; any HTTP
    /// status outside 2xx is returned as [`BinanceError::Api`] without
    /// retrying. An empty body decodes to [`Value::Null`].
    pub async fn send(&self, request: ApiRequest) -> Result<Value, BinanceError> {
        let credentials = match request.security {
            Security::None => None,
            Security::ApiKey | Security::Signed => Some(self.credentials()?),
        };

        let query = match (request.security, credentials) {
            (Security::Signed, Some(creds)) => {
                let mut params = request.params.clone();
                params.insert("timestamp", current_time_millis());
                params.insert("recvWindow", request.recv_window.unwrap_or(self.recv_window));
                sign_query(creds, &params)?
            }
            _ => request.params.to_query_string(),
        };

        let mut url = Url::parse(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            request.path
        ))?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        let started = SystemTime::now();
        let mut n_past_retries = 0;
        loop {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                attempt = n_past_retries + 1,
                "sending request"
            );

            let source = match self.attempt(&request, &url, credentials).await {
                Ok((status, body)) => return parse_response(&request, status, body),
                Err(source) => source,
            };

            if let Some(Retryable::Transient) = NetworkFailuresOnly.handle_failure(&source) {
                if let RetryDecision::Retry { execute_after } =
                    self.retry_policy.should_retry(started, n_past_retries)
                {
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        "retrying after network failure: {}",
                        source
                    );
                    let wait = execute_after
                        .duration_since(SystemTime::now())
                        .unwrap_or_default();
                    tokio::time::sleep(wait).await;
                    n_past_retries += 1;
                    continue;
                }
            }

            tracing::warn!(
                method = %request.method,
                path = %request.path,
                max_tries = self.max_tries,
                "request failed: {}",
                source
            );
            return Err(BinanceError::Transport {
                max_tries: self.max_tries,
                source,
            });
        }
    }

    /// Run one attempt, reading the whole body before returning.
    async fn attempt(
        &self,
        request: &ApiRequest,
        url: &Url,
        credentials: Option<&Credentials>,
    ) -> Result<(StatusCode, String), reqwest_middleware::Error> {
        let mut builder = self.http_client.request(request.method.clone(), url.clone());
        if let Some(creds) = credentials {
            builder = builder.header(API_KEY_HEADER, &creds.api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send an anonymous `GET` request.
    pub(crate) async fn public_get(
        &self,
        path: &str,
        params: Params,
    ) -> Result<Value, BinanceError> {
        self.send(ApiRequest::public(Method::GET, path).params(params))
            .await
    }

    /// Send a request and deserialize the response into `T`.
    ///
    /// Payloads wrapped as `{"code": .., "msg": .., "data": ..}` are
    /// unwrapped first; unknown fields are ignored.
    pub async fn send_as<T>(&self, request: ApiRequest) -> Result<T, BinanceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let document = unwrap_data(self.send(request).await?);
        serde_json::from_value(document.clone()).map_err(|e| {
            BinanceError::InvalidResponse(format!(
                "Failed to parse response: {}. Body: {}",
                e, document
            ))
        })
    }

    fn credentials(&self) -> Result<&Credentials, BinanceError> {
        self.credentials
            .as_ref()
            .map(|provider| provider.get_credentials())
            .ok_or(BinanceError::MissingCredentials)
    }
}

/// Parse a response from the Binance API.
fn parse_response(
    request: &ApiRequest,
    status: StatusCode,
    body: String,
) -> Result<Value, BinanceError> {
    if !status.is_success() {
        let error = ApiError::from_response(status.as_u16(), body);
        tracing::warn!(
            method = %request.method,
            path = %request.path,
            status = error.status,
            code = ?error.code,
            "request rejected: {}",
            error.message
        );
        return Err(BinanceError::Api(error));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| {
        BinanceError::InvalidResponse(format!(
            "Failed to parse response: {}. Body: {}",
            e, body
        ))
    })
}

/// Take the `data` member out of a `{"code", "msg", "data"}` envelope.
fn unwrap_data(document: Value) -> Value {
    match document {
        Value::Object(mut fields) if fields.contains_key("code") && fields.contains_key("data") => {
            fields.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

impl Default for OptionsRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OptionsRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("recv_window", &self.recv_window)
            .field("max_tries", &self.max_tries)
            .finish()
    }
}

/// Builder for [`OptionsRestClient`].
pub struct OptionsRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    client_order_ids: Option<Arc<dyn ClientOrderIdProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
    max_tries: u32,
    retry_interval: Duration,
    recv_window: u64,
}

impl OptionsRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BINANCE_OPTIONS_TESTNET_URL.to_string(),
            credentials: None,
            client_order_ids: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            max_tries: DEFAULT_MAX_TRIES,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom client order id provider.
    pub fn client_order_id_provider(mut self, provider: Arc<dyn ClientOrderIdProvider>) -> Self {
        self.client_order_ids = Some(provider);
        self
    }

    /// Use the default client order id scheme with a custom tag.
    pub fn client_order_id_tag(mut self, tag: impl Into<String>) -> Self {
        self.client_order_ids = Some(Arc::new(CountingClientOrderId::with_tag(tag)));
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timeout of a single attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the total number of attempts for requests failing at network level.
    pub fn max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries.max(1);
        self
    }

    /// Set the pause between attempts.
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Set the default receive window, in milliseconds.
    pub fn recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Build the client.
    pub fn build(self) -> OptionsRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("binance-options-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("binance-options-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to a default HTTP client: {}", e);
                reqwest::Client::new()
            });

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let client_order_ids = self
            .client_order_ids
            .unwrap_or_else(|| Arc::new(CountingClientOrderId::new()));

        OptionsRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            client_order_ids,
            retry_policy: FixedInterval::new(self.max_tries, self.retry_interval),
            recv_window: self.recv_window,
            max_tries: self.max_tries,
        }
    }
}

impl Default for OptionsRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    #[test]
    fn test_builder_defaults() {
        let client = OptionsRestClient::new();
        assert_eq!(client.base_url(), BINANCE_OPTIONS_TESTNET_URL);
        assert_eq!(client.recv_window(), DEFAULT_RECV_WINDOW);
        assert_eq!(client.max_tries(), DEFAULT_MAX_TRIES);
    }

    #[test]
    fn test_builder_keeps_at_least_one_try() {
        let client = OptionsRestClient::builder().max_tries(0).build();
        assert_eq!(client.max_tries(), 1);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = OptionsRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("key", "secret")))
            .build();
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_clones_share_client_order_ids() {
        let client = OptionsRestClient::builder().client_order_id_tag("t-").build();
        let clone = client.clone();
        let first = client.next_client_order_id();
        let second = clone.next_client_order_id();
        assert!(first.starts_with("t-") && first.ends_with("1000001"));
        assert!(second.ends_with("1000002"));
    }

    #[test]
    fn test_unwrap_data_envelope() {
        let wrapped = serde_json::json!({"code": 0, "msg": "success", "data": {"serverTime": 1}});
        assert_eq!(unwrap_data(wrapped), serde_json::json!({"serverTime": 1}));

        let bare = serde_json::json!({"serverTime": 1});
        assert_eq!(unwrap_data(bare.clone()), bare);
    }

    #[tokio::test]
    async fn test_signed_request_without_credentials_fails_locally() {
        let client = OptionsRestClient::builder().base_url("http://127.0.0.1:9").build();
        let result = client
            .send(ApiRequest::signed(Method::GET, "/api/v1/account"))
            .await;
        assert!(matches!(result, Err(BinanceError::MissingCredentials)));
    }
}
