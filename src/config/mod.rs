//! Configuration types for the Cloudflare API client.
//!
//! This module provides the configuration used to build an
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! # Overview
//!
//! - [`ClientConfig`]: Credentials plus transport settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`RetryPolicy`]: Bounded exponential backoff settings
//! - [`AuthEmail`], [`ApiKey`], [`ApiToken`], [`UserServiceKey`]: Validated credential newtypes
//! - [`BaseUrl`]: A validated API endpoint
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::{ApiToken, ClientConfig, RetryPolicy};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("my-api-token").unwrap())
//!     .rate_limit(4.0)
//!     .retry_policy(RetryPolicy::new(2, Duration::ZERO, Duration::from_secs(1)).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry_policy().max_retries(), 2);
//! ```

mod newtypes;
mod retry;

pub use newtypes::{ApiKey, ApiToken, AuthEmail, BaseUrl, UserServiceKey};
pub use retry::{is_retryable_status, AttemptOutcome, RetryPolicy};

use std::collections::HashMap;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Default client-side rate limit, in requests per second.
pub const DEFAULT_RATE_LIMIT: f64 = 4.0;

/// Configuration for the Cloudflare API client.
///
/// Holds the credentials and every transport option. A configuration is
/// immutable once built.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    credentials: Credentials,
    base_url: BaseUrl,
    user_agent: Option<String>,
    rate_limit: Option<f64>,
    retry_policy: RetryPolicy,
    extra_headers: HashMap<String, String>,
    http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent override, if configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the client-side rate limit in requests per second, or `None`
    /// when rate limiting is disabled.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<f64> {
        self.rate_limit
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns headers merged into every request.
    #[must_use]
    pub const fn extra_headers(&self) -> &HashMap<String, String> {
        &self.extra_headers
    }

    /// Returns the injected HTTP client, if any.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Credentials are required. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: `https://api.cloudflare.com/client/v4`
/// - `user_agent`: `cloudflare-api-rust/<version>`
/// - `rate_limit`: 4 requests per second
/// - `retry_policy`: 3 retries, backoff between 1s and 30s
/// - `extra_headers`: none
/// - `http_client`: a fresh `reqwest::Client` with rustls
#[derive(Debug)]
pub struct ClientConfigBuilder {
    credentials: Option<Credentials>,
    base_url: Option<BaseUrl>,
    user_agent: Option<String>,
    rate_limit: Option<f64>,
    retry_policy: Option<RetryPolicy>,
    extra_headers: HashMap<String, String>,
    http_client: Option<reqwest::Client>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: None,
            base_url: None,
            user_agent: None,
            rate_limit: Some(DEFAULT_RATE_LIMIT),
            retry_policy: None,
            extra_headers: HashMap::new(),
            http_client: None,
        }
    }

    /// Sets the credentials directly, replacing any previously set mode.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Authenticates with an account email and global API key.
    #[must_use]
    pub fn api_key(self, email: AuthEmail, key: ApiKey) -> Self {
        self.credentials(Credentials::ApiKey { email, key })
    }

    /// Authenticates with a user service key.
    #[must_use]
    pub fn user_service_key(self, key: UserServiceKey) -> Self {
        self.credentials(Credentials::UserServiceKey(key))
    }

    /// Authenticates with a bearer API token.
    #[must_use]
    pub fn api_token(self, token: ApiToken) -> Self {
        self.credentials(Credentials::ApiToken(token))
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the client-side rate limit in requests per second.
    #[must_use]
    pub const fn rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Disables client-side rate limiting.
    #[must_use]
    pub const fn disable_rate_limit(mut self) -> Self {
        self.rate_limit = None;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Replaces all extra headers.
    ///
    /// Credential headers in this map are ignored at request time.
    #[must_use]
    pub fn extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = headers;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Injects the HTTP client used for all requests.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if no credentials were set,
    /// or [`ConfigError::InvalidRateLimit`] for a non-positive rate limit.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;

        if let Some(value) = self.rate_limit {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRateLimit { value });
            }
        }

        Ok(ClientConfig {
            credentials,
            base_url: self.base_url.unwrap_or_default(),
            user_agent: self.user_agent,
            rate_limit: self.rate_limit,
            retry_policy: self.retry_policy.unwrap_or_default(),
            extra_headers: self.extra_headers,
            http_client: self.http_client,
        })
    }
}
