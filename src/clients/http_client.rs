//! HTTP transport for the Cloudflare API.
//!
//! This module provides the [`HttpClient`] type. It owns the connection
//! pool, the credentials, the retry policy and the client-side rate
//! limiter, and turns a `(method, path, body)` tuple into either a 2xx
//! [`HttpResponse`] or a typed [`Error`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::{is_credential_header, Credentials};
use crate::clients::context::Context;
use crate::clients::errors::{Error, InvalidHttpRequestError};
use crate::clients::http_request::{normalize_path, HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::rate_limit::RateLimiter;
use crate::config::{AttemptOutcome, ClientConfig, RetryPolicy};
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product name used in the default `User-Agent`.
pub const SDK_NAME: &str = "cloudflare-api-rust";

/// HTTP client for making requests to the Cloudflare API.
///
/// The client handles:
/// - URL composition from the configured base URL
/// - Default headers (`User-Agent`, `Accept`, `Content-Type`) and exactly
///   one credential header set per request
/// - Retries with bounded exponential backoff on 429, 5xx and transient
///   connection failures
/// - Client-side rate limiting shared by all clones
/// - Cancellation through [`Context`]
///
/// # Thread Safety
///
/// `HttpClient` is `Clone + Send + Sync`. Clones share the connection pool
/// and the rate limiter.
///
/// # Example
///
/// ```rust,no_run
/// use cloudflare_api::{ApiToken, ClientConfig, Context, HttpClient};
/// use cloudflare_api::clients::HttpMethod;
///
/// # async fn example() -> Result<(), cloudflare_api::Error> {
/// let config = ClientConfig::builder()
///     .api_token(ApiToken::new("my-api-token")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let response = client
///     .perform(&Context::background(), HttpMethod::Get, "/user", None)
///     .await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Headers sent with every request, credentials excluded.
    default_headers: HeaderMap,
    /// The active authentication mode.
    credentials: Credentials,
    retry_policy: RetryPolicy,
    rate_limiter: Option<Arc<RateLimiter>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a configured header cannot be sent or
    /// the underlying HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(|e| ConfigError::HttpClient {
                    reason: e.to_string(),
                })?,
        };

        let user_agent = config
            .user_agent()
            .map_or_else(|| format!("{SDK_NAME}/{SDK_VERSION}"), String::from);

        let mut default_headers = HeaderMap::new();
        insert_config_header(&mut default_headers, "User-Agent", &user_agent)?;
        insert_config_header(&mut default_headers, "Accept", "application/json")?;
        insert_config_header(&mut default_headers, "Content-Type", "application/json")?;

        for (name, value) in config.extra_headers() {
            if is_credential_header(name) {
                tracing::warn!(header = %name, "ignoring credential header in extra headers");
                continue;
            }
            insert_config_header(&mut default_headers, name, value)?;
        }

        Ok(Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            default_headers,
            credentials: config.credentials().clone(),
            retry_policy: *config.retry_policy(),
            rate_limiter: config.rate_limit().map(|rate| Arc::new(RateLimiter::new(rate))),
        })
    }

    /// Returns a client that authenticates with `credentials` and shares
    /// this client's connection pool and rate limiter.
    #[must_use]
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self {
            credentials,
            ..self.clone()
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client (credentials excluded).
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the active credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns the rate limit in requests per second, if enabled.
    #[must_use]
    pub fn rate_limit(&self) -> Option<f64> {
        self.rate_limiter.as_ref().map(|limiter| limiter.rate())
    }

    /// Sends a request built from its parts.
    ///
    /// `path` is relative to the base URL; a leading `/` is added when
    /// missing. A JSON body is encoded, a byte body is sent verbatim.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn perform(
        &self,
        ctx: &Context,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<HttpResponse, Error> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path, ""),
        };
        let mut builder = HttpRequest::builder(method, normalize_path(path)).query(query);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        self.request(ctx, builder.build()?).await
    }

    /// Sends an HTTP request to the Cloudflare API.
    ///
    /// Every attempt waits for a rate-limit token, builds a fresh header
    /// map, and races the network round trip against `ctx`. Failed attempts
    /// are retried according to the [`RetryPolicy`]; the wait between
    /// attempts is cancellable too.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if the request fails validation
    /// - [`Error::Cancelled`] if `ctx` finishes first
    /// - [`Error::Transport`] on network failure
    /// - [`Error::Api`] / [`Error::RateLimited`] for non-2xx responses
    /// - [`Error::UnmarshalErrorBody`] if an error body is not an envelope
    pub async fn request(
        &self,
        ctx: &Context,
        request: HttpRequest,
    ) -> Result<HttpResponse, Error> {
        request.verify()?;

        let url = format!("{}{}", self.base_url, request.path_and_query());
        let body = request.body.as_ref().map(RequestBody::to_bytes);

        let mut attempts: u32 = 0;
        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire(ctx).await?;
            }
            attempts += 1;

            let headers = self.headers_for(&request)?;
            tracing::debug!(
                method = %request.http_method,
                url = %url,
                attempt = attempts,
                auth = self.credentials.mode(),
                "sending request"
            );

            let mut builder = self
                .client
                .request(request.http_method.as_reqwest(), &url)
                .headers(headers);
            if let Some(body) = &body {
                builder = builder.body(body.clone());
            }

            let (outcome, error, retry_after) = match ctx.run(Self::execute(builder)).await? {
                Ok(response) => {
                    tracing::debug!(status = response.code, url = %url, "received response");
                    if response.is_ok() {
                        return Ok(response);
                    }
                    let retry_after = if response.code == 429 {
                        response.retry_after()
                    } else {
                        None
                    };
                    (
                        AttemptOutcome::Status(response.code),
                        Error::from_response(&response),
                        retry_after,
                    )
                }
                Err(source) => {
                    let outcome = if is_transient(&source) {
                        AttemptOutcome::TransientFailure
                    } else {
                        AttemptOutcome::Fatal
                    };
                    (outcome, Error::Transport { source }, None)
                }
            };

            let Some(backoff) = self.retry_policy.should_retry(outcome, attempts) else {
                return Err(error);
            };

            let delay = retry_after.map_or(backoff, |after| {
                after.max(backoff).min(self.retry_policy.max_backoff())
            });
            tracing::warn!(
                method = %request.http_method,
                url = %url,
                attempt = attempts,
                outcome = ?outcome,
                delay_ms = delay.as_millis(),
                "request failed, retrying"
            );
            ctx.run(tokio::time::sleep(delay)).await?;
        }
    }

    async fn execute(builder: reqwest::RequestBuilder) -> Result<HttpResponse, reqwest::Error> {
        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();
        Ok(HttpResponse::new(code, headers, body))
    }

    /// Builds the header map for one attempt.
    ///
    /// Caller headers may override the defaults but never the credential
    /// headers, which are inserted last.
    fn headers_for(&self, request: &HttpRequest) -> Result<HeaderMap, Error> {
        let mut headers = self.default_headers.clone();

        if let Some(extra) = &request.extra_headers {
            for (name, value) in extra {
                if is_credential_header(name) {
                    tracing::debug!(header = %name, "ignoring credential header on request");
                    continue;
                }
                let (name, value) = parse_header(name, value)
                    .ok_or_else(|| InvalidHttpRequestError::InvalidHeader { name: name.clone() })?;
                headers.insert(name, value);
            }
        }

        for (name, value) in self.credentials.headers() {
            let (name, mut value) =
                parse_header(name, &value).ok_or_else(|| ConfigError::InvalidHeader {
                    name: name.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

fn parse_header(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
    let value = HeaderValue::from_str(value).ok()?;
    Some((name, value))
}

fn insert_config_header(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let (name_value, value) = parse_header(name, value).ok_or_else(|| ConfigError::InvalidHeader {
        name: name.to_string(),
    })?;
    headers.insert(name_value, value);
    Ok(())
}

/// Connection failures that may succeed on another attempt.
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

/// Parses response headers into a map keyed by lower-cased name.
fn parse_response_headers(
    headers: &HeaderMap,
) -> std::collections::HashMap<String, Vec<String>> {
    let mut result: std::collections::HashMap<String, Vec<String>> =
        std::collections::HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiToken, BaseUrl};

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .header("X-Trace", "on")
            .header("Authorization", "Bearer sneaky")
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_user_agent() {
        let client = HttpClient::new(&config()).unwrap();
        let user_agent = client.default_headers().get("user-agent").unwrap();
        assert_eq!(
            user_agent.to_str().unwrap(),
            format!("cloudflare-api-rust/{SDK_VERSION}")
        );
    }

    #[test]
    fn test_user_agent_override() {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("t").unwrap())
            .user_agent("terraform/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(
            client.default_headers().get("user-agent").unwrap(),
            "terraform/1.0"
        );
    }

    #[test]
    fn test_default_headers_exclude_credentials() {
        let client = HttpClient::new(&config()).unwrap();
        assert!(client.default_headers().get("authorization").is_none());
        assert_eq!(client.default_headers().get("x-trace").unwrap(), "on");
        assert_eq!(
            client.default_headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_request_headers_carry_one_credential_set() {
        let client = HttpClient::new(&config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "user")
            .header("X-Auth-Key", "override")
            .header("Accept", "text/plain")
            .build()
            .unwrap();

        let headers = client.headers_for(&request).unwrap();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer test-token");
        assert!(headers.get("x-auth-key").is_none());
        assert!(headers.get("x-auth-email").is_none());
        assert_eq!(headers.get("accept").unwrap(), "text/plain");
    }

    #[test]
    fn test_with_credentials_shares_rate_limiter() {
        let client = HttpClient::new(&config()).unwrap();
        let switched =
            client.with_credentials(Credentials::api_key("a@example.org", "deadbeef").unwrap());

        assert_eq!(switched.credentials().mode(), "api_key");
        assert_eq!(client.credentials().mode(), "api_token");
        assert!(Arc::ptr_eq(
            client.rate_limiter.as_ref().unwrap(),
            switched.rate_limiter.as_ref().unwrap()
        ));

        let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
        let headers = switched.headers_for(&request).unwrap();
        assert_eq!(headers.get("x-auth-email").unwrap(), "a@example.org");
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn test_invalid_config_header_is_rejected() {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("t").unwrap())
            .header("Bad Header", "x")
            .build()
            .unwrap();
        assert!(matches!(
            HttpClient::new(&config),
            Err(Error::Config(ConfigError::InvalidHeader { .. }))
        ));
    }

    #[test]
    fn test_rate_limit_disabled() {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("t").unwrap())
            .disable_rate_limit()
            .build()
            .unwrap();
        assert!(HttpClient::new(&config).unwrap().rate_limit().is_none());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
