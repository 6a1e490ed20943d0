//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Secret values are masked in debug output.

use crate::error::ConfigError;
use std::fmt;

/// The account email paired with a global API key.
///
/// # Example
///
/// ```rust
/// use cloudflare_api::AuthEmail;
///
/// let email = AuthEmail::new("cloudflare@example.org").unwrap();
/// assert_eq!(email.as_ref(), "cloudflare@example.org");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEmail(String);

impl AuthEmail {
    /// Creates a new validated account email.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthEmail`] if the email is empty.
    pub fn new(email: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(ConfigError::EmptyAuthEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for AuthEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Declares a non-empty secret newtype whose `Debug` output is masked.
macro_rules! secret_newtype {
    ($(#[$meta:meta])* $name:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new validated `", stringify!($name), "`.")]
            ///
            /// # Errors
            ///
            #[doc = concat!(
                "Returns [`ConfigError::",
                stringify!($error),
                "`] if the value is empty."
            )]
            pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ConfigError::$error);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(*****)"))
            }
        }
    };
}

secret_newtype!(
    /// A Cloudflare global API key, used together with [`AuthEmail`].
    ///
    /// ```rust
    /// use cloudflare_api::ApiKey;
    ///
    /// let key = ApiKey::new("deadbeef").unwrap();
    /// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
    /// ```
    ApiKey,
    EmptyApiKey
);

secret_newtype!(
    /// A scoped Cloudflare API token, sent as a bearer credential.
    ///
    /// ```rust
    /// use cloudflare_api::ApiToken;
    ///
    /// let token = ApiToken::new("my-api-token").unwrap();
    /// assert_eq!(token.as_ref(), "my-api-token");
    /// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
    /// ```
    ApiToken,
    EmptyApiToken
);

secret_newtype!(
    /// A user service key (origin CA key).
    UserServiceKey,
    EmptyUserServiceKey
);

/// A validated API base URL.
///
/// Trailing slashes are removed so that relative request paths can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use cloudflare_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.cloudflare.com/client/v4/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.cloudflare.com/client/v4");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.cloudflare.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The public Cloudflare v4 REST endpoint.
    pub const DEFAULT: &'static str = "https://api.cloudflare.com/client/v4";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !matches!(scheme, "http" | "https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() || url.contains(['?', '#']) {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: 26,
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
