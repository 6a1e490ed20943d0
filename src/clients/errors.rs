//! Error types for the Cloudflare API client.
//!
//! Every operation returns [`Error`]. Its [`kind`](Error::kind) is the
//! stable, programmatically inspectable classification; the variants carry
//! the detail (envelope entries, raw bodies, wrapped causes).
//!
//! # Error Handling
//!
//! - [`ErrorKind::Transport`] and the retryable subset of
//!   [`ErrorKind::Api`] (429 and 5xx) are retried by the transport before
//!   they reach the caller.
//! - Everything else surfaces immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudflare_api::{Error, ErrorKind};
//!
//! match DnsRecord::get(&client, &ctx, &zone, "372e6795").await {
//!     Ok(record) => println!("{}", record.name),
//!     Err(e) if e.kind() == ErrorKind::Api => {
//!         let api = e.api_error().unwrap();
//!         println!("codes {:?}, ray {:?}", api.error_codes(), api.ray_id);
//!     }
//!     Err(e) => println!("{e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::context::CancelReason;
use crate::clients::http_response::HttpResponse;
use crate::error::ConfigError;
use crate::rest::{ResourceLevel, ResponseInfo};

/// Error returned when an HTTP request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Invalid request path '{path}'.")]
    InvalidPath {
        /// The path that was provided.
        path: String,
    },

    /// A body was attached to a method that cannot carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method.
        method: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// A non-success answer from the API.
///
/// Carries the HTTP status and the envelope's `errors` and `messages`
/// (including nested `error_chain` entries) from the final attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code.
    pub status: u16,
    /// Envelope error entries, in server order.
    pub errors: Vec<ResponseInfo>,
    /// Envelope informational messages.
    pub messages: Vec<ResponseInfo>,
    /// The `cf-ray` header of the response, if present.
    pub ray_id: Option<String>,
}

impl ApiError {
    /// Returns `true` for HTTP 401.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        self.status == 401
    }

    /// Returns `true` for HTTP 403.
    #[must_use]
    pub const fn is_authorization(&self) -> bool {
        self.status == 403
    }

    /// Returns `true` for HTTP 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns `true` for HTTP 429.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns `true` for any 5xx status.
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        self.status >= 500 && self.status <= 599
    }

    /// Returns the top-level error codes.
    #[must_use]
    pub fn error_codes(&self) -> Vec<i64> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// Returns the top-level error messages.
    #[must_use]
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Returns `true` if any entry, including chained ones, has `code`.
    #[must_use]
    pub fn contains_error_code(&self, code: i64) -> bool {
        fn walk(entries: &[ResponseInfo], code: i64) -> bool {
            entries
                .iter()
                .any(|e| e.code == code || walk(&e.error_chain, code))
        }
        walk(&self.errors, code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP status {}", self.status)?;
        if !self.errors.is_empty() {
            let joined = self
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, ": {joined}")?;
        }
        if let Some(ray_id) = &self.ray_id {
            write!(f, " (ray id {ray_id})")?;
        }
        Ok(())
    }
}

/// Programmatic classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No authentication mode was configured.
    MissingCredentials,
    /// The resource container's level is not accepted by the operation.
    InvalidResourceContainer,
    /// A required identifier was empty.
    MissingIdentifier,
    /// An operation-local precondition failed, or configuration was invalid.
    Validation,
    /// The server could not be reached or the body could not be read.
    Transport,
    /// The server answered with a non-2xx status or `success=false`.
    Api,
    /// HTTP 429 after retries were exhausted.
    RateLimited,
    /// The response body did not match the expected shape.
    Unmarshal,
    /// An error response body could not be decoded.
    UnmarshalErrorBody,
    /// The context finished first.
    Cancelled,
    /// Only one of `page` / `per_page` was supplied.
    ManualPaginationRequired,
}

impl ErrorKind {
    /// Returns the kebab-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing-credentials",
            Self::InvalidResourceContainer => "invalid-resource-container",
            Self::MissingIdentifier => "missing-identifier",
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Api => "api",
            Self::RateLimited => "rate-limited",
            Self::Unmarshal => "unmarshal",
            Self::UnmarshalErrorBody => "unmarshal-error-body",
            Self::Cancelled => "cancelled",
            Self::ManualPaginationRequired => "manual-pagination-required",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type returned by every client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Client configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The operation does not accept the container's level.
    #[error("{operation}: invalid resource container level \"{level}\"")]
    InvalidResourceContainer {
        /// The operation that rejected the container.
        operation: String,
        /// The rejected level.
        level: ResourceLevel,
    },

    /// A required identifier was empty.
    #[error("{operation}: required missing {field}")]
    MissingIdentifier {
        /// The operation that needed the identifier.
        operation: String,
        /// The name of the missing identifier.
        field: &'static str,
    },

    /// An operation-local precondition failed.
    #[error("{message}")]
    Validation {
        /// What was wrong.
        message: String,
    },

    /// The request could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The resource does not support the operation.
    #[error("{resource} does not support {operation}")]
    UnsupportedOperation {
        /// The resource name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Network failure or unreadable body.
    #[error("error from makeRequest: HTTP request failed: {source}")]
    Transport {
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The API returned an error envelope.
    #[error("error from makeRequest: {0}")]
    Api(ApiError),

    /// HTTP 429 after retries were exhausted.
    #[error("error from makeRequest: rate limited: {0}")]
    RateLimited(ApiError),

    /// A successful response body did not match the expected shape.
    #[error("error unmarshalling the JSON response ({context}): {source}")]
    Unmarshal {
        /// The request whose response was being decoded.
        context: String,
        /// The raw body, for diagnostics.
        body: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// An error response body was not a JSON envelope.
    #[error("error unmarshalling the JSON response error body (HTTP status {status}): {source}")]
    UnmarshalErrorBody {
        /// The HTTP status of the response.
        status: u16,
        /// The raw body, for diagnostics.
        body: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// A page of a paged list broke the `result_info` consistency rules.
    #[error("error unmarshalling the JSON response: inconsistent page: {reason}")]
    InvalidPage {
        /// Which rule failed.
        reason: String,
    },

    /// The context finished before the operation completed.
    #[error("request cancelled: {0}")]
    Cancelled(CancelReason),

    /// Only one of `page` / `per_page` was supplied.
    #[error("manual pagination required: set both page and per_page, or neither")]
    ManualPaginationRequired,
}

impl Error {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(e) if e.is_missing_credentials() => ErrorKind::MissingCredentials,
            Self::Config(_)
            | Self::Validation { .. }
            | Self::InvalidRequest(_)
            | Self::UnsupportedOperation { .. } => ErrorKind::Validation,
            Self::InvalidResourceContainer { .. } => ErrorKind::InvalidResourceContainer,
            Self::MissingIdentifier { .. } => ErrorKind::MissingIdentifier,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Unmarshal { .. } | Self::InvalidPage { .. } => ErrorKind::Unmarshal,
            Self::UnmarshalErrorBody { .. } => ErrorKind::UnmarshalErrorBody,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::ManualPaginationRequired => ErrorKind::ManualPaginationRequired,
        }
    }

    /// Returns the API error for [`ErrorKind::Api`] and
    /// [`ErrorKind::RateLimited`].
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) | Self::RateLimited(e) => Some(e),
            _ => None,
        }
    }

    /// Creates a [`Error::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a [`Error::Unmarshal`] keeping a lossy copy of `body`.
    #[must_use]
    pub fn unmarshal(context: impl Into<String>, body: &[u8], source: serde_json::Error) -> Self {
        Self::Unmarshal {
            context: context.into(),
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }
    }

    /// Builds the typed error for a non-2xx response.
    ///
    /// An empty body yields an API error without entries. A body that is
    /// not an error envelope yields [`Error::UnmarshalErrorBody`].
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorEnvelope {
            #[serde(default)]
            errors: Vec<ResponseInfo>,
            #[serde(default)]
            messages: Vec<ResponseInfo>,
        }

        let (errors, messages) = if response.body.iter().all(u8::is_ascii_whitespace) {
            (Vec::new(), Vec::new())
        } else {
            match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
                Ok(envelope) => (envelope.errors, envelope.messages),
                Err(source) => {
                    return Self::UnmarshalErrorBody {
                        status: response.code,
                        body: response.text(),
                        source,
                    }
                }
            }
        };

        let api_error = ApiError {
            status: response.code,
            errors,
            messages,
            ray_id: response.ray_id().map(String::from),
        };

        if api_error.is_rate_limited() {
            Self::RateLimited(api_error)
        } else {
            Self::Api(api_error)
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16, body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("cf-ray".to_string(), vec!["8a1b2c3d4e5f-LHR".to_string()]);
        HttpResponse::new(code, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_from_response_extracts_envelope_errors() {
        let error = Error::from_response(&response(
            400,
            r#"{
                "success": false,
                "errors": [{
                    "code": 1004,
                    "message": "DNS Validation Error",
                    "error_chain": [{"code": 9005, "message": "Content for A record is invalid."}]
                }],
                "messages": [],
                "result": null
            }"#,
        ));

        assert_eq!(error.kind(), ErrorKind::Api);
        let api = error.api_error().unwrap();
        assert_eq!(api.status, 400);
        assert_eq!(api.error_codes(), vec![1004]);
        assert_eq!(api.error_messages(), vec!["DNS Validation Error"]);
        assert!(api.contains_error_code(9005));
        assert_eq!(api.ray_id.as_deref(), Some("8a1b2c3d4e5f-LHR"));
    }

    #[test]
    fn test_from_response_maps_429_to_rate_limited() {
        let error = Error::from_response(&response(
            429,
            r#"{
                "success": false,
                "errors": [{"code": 971, "message": "Please wait and consider throttling"}]
            }"#,
        ));
        assert_eq!(error.kind(), ErrorKind::RateLimited);
        assert!(error.api_error().unwrap().is_rate_limited());
    }

    #[test]
    fn test_from_response_keeps_raw_body_when_not_json() {
        let error = Error::from_response(&response(502, "<html>Bad Gateway</html>"));
        assert_eq!(error.kind(), ErrorKind::UnmarshalErrorBody);
        match error {
            Error::UnmarshalErrorBody { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_with_empty_body() {
        let error = Error::from_response(&response(503, ""));
        assert_eq!(error.kind(), ErrorKind::Api);
        assert!(error.api_error().unwrap().is_service_error());
        assert!(error.api_error().unwrap().errors.is_empty());
    }

    #[test]
    fn test_api_error_status_helpers() {
        let error = |status| ApiError {
            status,
            ..ApiError::default()
        };
        assert!(error(401).is_authentication());
        assert!(error(403).is_authorization());
        assert!(error(404).is_not_found());
        assert!(error(500).is_service_error());
        assert!(!error(404).is_service_error());
    }

    #[test]
    fn test_display_starts_with_tag() {
        let error = Error::Api(ApiError {
            status: 403,
            errors: vec![ResponseInfo {
                code: 10000,
                message: "Authentication error".to_string(),
                error_chain: Vec::new(),
            }],
            messages: Vec::new(),
            ray_id: None,
        });
        assert_eq!(
            error.to_string(),
            "error from makeRequest: HTTP status 403: Authentication error (10000)"
        );

        let error = Error::unmarshal(
            "dns record",
            b"not json",
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        );
        assert!(error
            .to_string()
            .starts_with("error unmarshalling the JSON response"));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::from(ConfigError::MissingCredentials).kind(),
            ErrorKind::MissingCredentials
        );
        assert_eq!(
            Error::from(ConfigError::InvalidRateLimit { value: -1.0 }).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::MissingIdentifier {
                operation: "DnsRecord::update".to_string(),
                field: "id",
            }
            .kind(),
            ErrorKind::MissingIdentifier
        );
        assert_eq!(
            Error::InvalidPage {
                reason: "count".to_string()
            }
            .kind(),
            ErrorKind::Unmarshal
        );
        assert_eq!(
            Error::Cancelled(CancelReason::DeadlineExceeded).kind(),
            ErrorKind::Cancelled
        );
        assert_eq!(ErrorKind::ManualPaginationRequired.as_str(), "manual-pagination-required");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
