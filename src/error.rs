//! Configuration error types for the Cloudflare API client.
//!
//! This module contains the error type returned while building a client
//! configuration or constructing credential newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Once a client has been built, every operation
//! returns the crate-wide [`Error`](crate::Error), which wraps `ConfigError`
//! in its `Config` variant.
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// No authentication mode was configured.
    #[error("Missing credentials. Configure an API token, a user service key, or an email and global API key.")]
    MissingCredentials,

    /// Account email cannot be empty.
    #[error("Account email cannot be empty. Please provide the email used with the global API key.")]
    EmptyAuthEmail,

    /// Global API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Cloudflare global API key.")]
    EmptyApiKey,

    /// API token cannot be empty.
    #[error("API token cannot be empty. Please provide a valid Cloudflare API token.")]
    EmptyApiToken,

    /// User service key cannot be empty.
    #[error("User service key cannot be empty. Please provide a valid origin CA key.")]
    EmptyUserServiceKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.cloudflare.com/client/v4').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Rate limit must be a positive, finite number of requests per second.
    #[error("Invalid rate limit {value}. Expected a positive number of requests per second.")]
    InvalidRateLimit {
        /// The rejected value.
        value: f64,
    },

    /// Retry policy bounds are inconsistent.
    #[error("Invalid retry policy: {reason}")]
    InvalidRetryPolicy {
        /// Why the policy was rejected.
        reason: String,
    },

    /// A configured header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}'. Header names and values must be visible ASCII.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// The reason reported by the HTTP stack.
        reason: String,
    },
}

impl ConfigError {
    /// Returns `true` when this error means no usable credentials were supplied.
    #[must_use]
    pub const fn is_missing_credentials(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials
                | Self::EmptyAuthEmail
                | Self::EmptyApiKey
                | Self::EmptyApiToken
                | Self::EmptyUserServiceKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_error_message() {
        let message = ConfigError::MissingCredentials.to_string();
        assert!(message.contains("Missing credentials"));
        assert!(message.contains("API token"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_empty_credential_errors_count_as_missing_credentials() {
        assert!(ConfigError::MissingCredentials.is_missing_credentials());
        assert!(ConfigError::EmptyApiToken.is_missing_credentials());
        assert!(ConfigError::EmptyAuthEmail.is_missing_credentials());
        assert!(!ConfigError::InvalidRateLimit { value: 0.0 }.is_missing_credentials());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
