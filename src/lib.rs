//! # Cloudflare API Rust Client
//!
//! An async client core for the Cloudflare v4 REST API, providing
//! type-safe configuration, credential handling, a retrying and
//! rate-limited HTTP transport, and the building blocks shared by every
//! product endpoint.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for credentials and the API endpoint
//! - Three mutually exclusive authentication modes via [`Credentials`]
//! - An async HTTP transport with retry, backoff, client-side rate limiting,
//!   and cancellation through [`Context`]
//! - Envelope decoding, pagination, and query encoding in [`rest`]
//! - Resource containers (account, zone, user) that reject wrong scopes
//!   before any request is sent
//! - Representative product wrappers in [`rest::resources`]
//! - Tri-state value helpers in [`optional`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudflare_api::{ApiToken, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("your-api-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rate_limit(), Some(4.0));
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use cloudflare_api::{ApiToken, ClientConfig, Context, RestClient};
//! use cloudflare_api::rest::{Resource, ResourceContainer};
//! use cloudflare_api::rest::resources::{DnsRecord, DnsRecordListParams};
//!
//! # async fn example() -> Result<(), cloudflare_api::Error> {
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("your-api-token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let ctx = Context::with_timeout(Duration::from_secs(30));
//! let zone = ResourceContainer::zone("023e105f4ecef8ad9ca31a8372d0c353");
//!
//! // Fetches every page.
//! let params = DnsRecordListParams::default();
//! let (records, info) = DnsRecord::list(&client, &ctx, &zone, &params).await?;
//! println!("{} records ({} total)", records.len(), info.total_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Error`]. Use [`Error::kind`] to branch on the
//! failure class and [`Error::api_error`] to inspect the codes and messages
//! returned by the API:
//!
//! ```rust,ignore
//! match DnsRecord::get(&client, &ctx, &zone, "372e6795").await {
//!     Err(e) if e.api_error().is_some_and(|api| api.is_not_found()) => { /* ... */ }
//!     Err(e) => return Err(e),
//!     Ok(record) => { /* ... */ }
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Clone + Send + Sync` and share one pool
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Deadlines are explicit**: Timeouts come only from [`Context`]

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod optional;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Credentials;
pub use config::{
    ApiKey, ApiToken, AuthEmail, BaseUrl, ClientConfig, ClientConfigBuilder, RetryPolicy,
    UserServiceKey,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, CancelHandle, Context, Error, ErrorKind, HttpClient, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, RestClient,
};
