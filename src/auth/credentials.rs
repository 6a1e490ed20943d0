//! Credential modes and the headers they produce.

use crate::config::{ApiKey, ApiToken, AuthEmail, UserServiceKey};
use crate::error::ConfigError;

/// Header carrying the account email for global API key auth.
pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";
/// Header carrying the global API key.
pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";
/// Header carrying a user service key.
pub const AUTH_USER_SERVICE_KEY_HEADER: &str = "X-Auth-User-Service-Key";
/// Header carrying a bearer API token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Every header that may carry a credential.
///
/// Caller-supplied headers with any of these names are dropped so that a
/// request always carries exactly one credential set.
pub const CREDENTIAL_HEADERS: [&str; 4] = [
    AUTH_EMAIL_HEADER,
    AUTH_KEY_HEADER,
    AUTH_USER_SERVICE_KEY_HEADER,
    AUTHORIZATION_HEADER,
];

/// Returns `true` if `name` is one of [`CREDENTIAL_HEADERS`] (case-insensitive).
#[must_use]
pub fn is_credential_header(name: &str) -> bool {
    CREDENTIAL_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

/// The authentication mode of a client.
///
/// Exactly one mode is active at a time. Credentials live with the client
/// instance and are never written anywhere.
///
/// # Example
///
/// ```rust
/// use cloudflare_api::Credentials;
///
/// let credentials = Credentials::api_token("my-api-token").unwrap();
/// let headers = credentials.headers();
/// assert_eq!(headers, vec![("Authorization", "Bearer my-api-token".to_string())]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Legacy account email plus global API key.
    ApiKey {
        /// The account email.
        email: AuthEmail,
        /// The global API key.
        key: ApiKey,
    },
    /// A user service key (origin CA key).
    UserServiceKey(UserServiceKey),
    /// A scoped API token sent as `Authorization: Bearer`.
    ApiToken(ApiToken),
}

impl Credentials {
    /// Builds legacy email + global key credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either value is empty.
    pub fn api_key(email: impl Into<String>, key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::ApiKey {
            email: AuthEmail::new(email)?,
            key: ApiKey::new(key)?,
        })
    }

    /// Builds user service key credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUserServiceKey`] if the key is empty.
    pub fn user_service_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::UserServiceKey(UserServiceKey::new(key)?))
    }

    /// Builds bearer token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty.
    pub fn api_token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::ApiToken(ApiToken::new(token)?))
    }

    /// Returns a short name for the mode, safe to log.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "api_key",
            Self::UserServiceKey(_) => "user_service_key",
            Self::ApiToken(_) => "api_token",
        }
    }

    /// Returns the header set for this mode.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ApiKey { email, key } => vec![
                (AUTH_EMAIL_HEADER, email.as_ref().to_string()),
                (AUTH_KEY_HEADER, key.as_ref().to_string()),
            ],
            Self::UserServiceKey(key) => {
                vec![(AUTH_USER_SERVICE_KEY_HEADER, key.as_ref().to_string())]
            }
            Self::ApiToken(token) => vec![(
                AUTHORIZATION_HEADER,
                format!("Bearer {}", token.as_ref()),
            )],
        }
    }
}
