//! REST API client for the Cloudflare v4 API.
//!
//! This module provides [`RestClient`], a thin layer over
//! [`HttpClient`](crate::clients::HttpClient) that serialises request
//! bodies and decodes the `{success, errors, messages, result}` envelope
//! into [`Response`](crate::rest::Response) or
//! [`ListResponse`](crate::rest::ListResponse).
//!
//! Retries, rate limiting, and cancellation all happen in the transport;
//! the REST client adds none of its own.

mod client;

pub use client::RestClient;
