//! HTTP client types for Cloudflare API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Cloudflare v4 API. It handles request construction,
//! retry with backoff, client-side rate limiting, cancellation, and error
//! extraction from failed responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`Context`]: Deadline and cancellation for a call
//! - [`RateLimiter`]: The token bucket gating every attempt
//! - [`RestClient`]: Envelope-decoding client built on [`HttpClient`]
//! - [`Error`]: The crate-wide error type, classified by [`ErrorKind`]
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use cloudflare_api::{ApiToken, ClientConfig, Context, HttpClient};
//! use cloudflare_api::clients::HttpMethod;
//!
//! # async fn example() -> Result<(), cloudflare_api::Error> {
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("my-api-token")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let ctx = Context::with_timeout(Duration::from_secs(10));
//! let response = client.perform(&ctx, HttpMethod::Get, "/user", None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Retry Behavior
//!
//! - **429 and 5xx**: retried up to `max_retries` times with exponential
//!   backoff between `min_backoff` and `max_backoff`; a 429 `Retry-After`
//!   header lengthens the wait (still capped at `max_backoff`)
//! - **Connection failures and timeouts**: retried the same way
//! - **Other 4xx**: returned immediately
//!
//! After the last attempt the typed error of the final response is
//! returned.

pub mod context;
mod errors;
mod http_client;
mod http_request;
pub mod http_response;
mod rate_limit;
pub mod rest;

pub use context::{CancelHandle, CancelReason, Context};
pub use errors::{ApiError, Error, ErrorKind, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_NAME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::{HttpResponse, RAY_ID_HEADER};
pub use rate_limit::RateLimiter;

// Re-export REST client types at the clients module level
pub use rest::RestClient;
