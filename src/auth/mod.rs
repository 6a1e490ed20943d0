//! Authentication types for the Cloudflare API client.
//!
//! Cloudflare accepts three mutually exclusive credential modes:
//!
//! - **API token**: `Authorization: Bearer <token>` (recommended)
//! - **Global API key**: `X-Auth-Email` + `X-Auth-Key`
//! - **User service key**: `X-Auth-User-Service-Key`
//!
//! A client holds exactly one [`Credentials`] value. Use
//! [`HttpClient::with_credentials`](crate::clients::HttpClient::with_credentials)
//! to switch modes without rebuilding the connection pool.

mod credentials;

pub use credentials::{
    is_credential_header, Credentials, AUTHORIZATION_HEADER, AUTH_EMAIL_HEADER, AUTH_KEY_HEADER,
    AUTH_USER_SERVICE_KEY_HEADER, CREDENTIAL_HEADERS,
};
