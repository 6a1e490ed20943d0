//! REST client implementation for the Cloudflare v4 API.
//!
//! This module provides the [`RestClient`] type, which pairs the
//! [`HttpClient`] transport with envelope decoding.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Credentials;
use crate::clients::{Context, Error, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::ClientConfig;
use crate::rest::{decode_list, decode_response, ListResponse, Response};

/// REST API client for the Cloudflare v4 API.
///
/// Provides typed methods (`get`, `get_list`, `post`, `put`, `patch`,
/// `delete`) that send a request through the transport and decode the
/// `{success, errors, messages, result}` envelope.
///
/// # Thread Safety
///
/// `RestClient` is `Clone + Send + Sync`, making it safe to share across
/// async tasks.
///
/// # Example
///
/// ```rust,no_run
/// use cloudflare_api::{ApiToken, ClientConfig, Context, RestClient};
///
/// # async fn example() -> Result<(), cloudflare_api::Error> {
/// let config = ClientConfig::builder()
///     .api_token(ApiToken::new("my-api-token")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let zone: serde_json::Value = client
///     .get(&Context::background(), "zones/023e105f4ecef8ad9ca31a8372d0c353", None)
///     .await?
///     .result;
/// println!("{zone}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the transport cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::from_http_client(HttpClient::new(config)?))
    }

    /// Wraps an existing transport.
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Returns a client that authenticates with `credentials` and shares
    /// the connection pool and rate limiter.
    #[must_use]
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        Self::from_http_client(self.http_client.with_credentials(credentials))
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request and decodes a single-result envelope.
    ///
    /// `query` is an already-encoded query string (see
    /// [`encode_query`](crate::rest::query::encode_query)).
    ///
    /// # Errors
    ///
    /// Returns transport, API, or unmarshal errors.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&str>,
    ) -> Result<Response<T>, Error> {
        let response = self.raw(ctx, HttpMethod::Get, path, query, None).await?;
        decode_response(&response, &describe(HttpMethod::Get, path))
    }

    /// Sends a GET request and decodes a list envelope.
    ///
    /// # Errors
    ///
    /// Returns transport, API, or unmarshal errors.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<&str>,
    ) -> Result<ListResponse<T>, Error> {
        let response = self.raw(ctx, HttpMethod::Get, path, query, None).await?;
        decode_list(&response, &describe(HttpMethod::Get, path))
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `body` cannot be serialised, otherwise
    /// transport, API, or unmarshal errors.
    pub async fn post<B, T>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
    ) -> Result<Response<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ctx, HttpMethod::Post, path, Some(to_json(body)?)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn put<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<Response<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ctx, HttpMethod::Put, path, Some(to_json(body)?)).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`post`](Self::post).
    pub async fn patch<B, T>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
    ) -> Result<Response<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ctx, HttpMethod::Patch, path, Some(to_json(body)?)).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns transport, API, or unmarshal errors.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
    ) -> Result<Response<T>, Error> {
        self.send(ctx, HttpMethod::Delete, path, None).await
    }

    /// Sends a request with an optional JSON body and decodes a
    /// single-result envelope.
    ///
    /// # Errors
    ///
    /// Returns transport, API, or unmarshal errors.
    pub async fn send<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response<T>, Error> {
        let response = self.raw(ctx, method, path, None, body).await?;
        decode_response(&response, &describe(method, path))
    }

    /// Sends a request and returns the undecoded 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for a malformed request, otherwise
    /// transport or API errors.
    pub async fn raw(
        &self,
        ctx: &Context,
        method: HttpMethod,
        path: &str,
        query: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, Error> {
        let mut builder = HttpRequest::builder(method, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.http_client.request(ctx, builder.build()?).await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, Error> {
    serde_json::to_value(body)
        .map_err(|e| Error::validation(format!("cannot encode request body: {e}")))
}

fn describe(method: HttpMethod, path: &str) -> String {
    format!("{method} /{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiToken;

    fn client() -> RestClient {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_describe_normalizes_leading_slash() {
        assert_eq!(describe(HttpMethod::Get, "zones/abc"), "GET /zones/abc");
        assert_eq!(describe(HttpMethod::Delete, "/user"), "DELETE /user");
    }

    #[test]
    fn test_with_credentials_switches_auth_mode() {
        let client = client();
        let switched = client.with_credentials(Credentials::user_service_key("v1.0-abc").unwrap());
        assert_eq!(client.http_client().credentials().mode(), "api_token");
        assert_eq!(switched.http_client().credentials().mode(), "user_service_key");
    }

    #[tokio::test]
    async fn test_get_with_body_is_not_possible_through_raw() {
        let error = client()
            .raw(
                &Context::background(),
                HttpMethod::Get,
                "zones",
                None,
                Some(serde_json::json!({"a": 1})),
            )
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_empty_path_is_rejected_before_sending() {
        let error = client()
            .get::<serde_json::Value>(&Context::background(), "", None)
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidRequest(_)));
    }
}
