//! HTTP response types for the Cloudflare API client.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

/// Header carrying Cloudflare's per-request trace identifier.
pub const RAY_ID_HEADER: &str = "cf-ray";

/// A raw HTTP response from the API.
///
/// The body is kept as bytes; envelope decoding happens one layer up in
/// [`RestClient`](crate::clients::RestClient).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` when present.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns the `Retry-After` wait as a [`Duration`].
    ///
    /// Values too large to represent saturate to [`Duration::MAX`].
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_request_after
            .map(|seconds| Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header (name is matched case-insensitively).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `cf-ray` header value, if present.
    ///
    /// Include this ID when reporting problems to Cloudflare support.
    #[must_use]
    pub fn ray_id(&self) -> Option<&str> {
        self.header(RAY_ID_HEADER)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), Vec::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 404, 429, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), Vec::new()).is_ok());
        }
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2".to_string()]);

        let response = HttpResponse::new(429, headers, Vec::new());
        assert!((response.retry_request_after.unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_huge_retry_after_saturates() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["1e30".to_string()]);

        let response = HttpResponse::new(429, headers, Vec::new());
        assert_eq!(response.retry_after(), Some(Duration::MAX));
    }

    #[test]
    fn test_retry_after_ignores_http_dates() {
        let mut headers = HashMap::new();
        headers.insert(
            "retry-after".to_string(),
            vec!["Wed, 21 Oct 2015 07:28:00 GMT".to_string()],
        );

        let response = HttpResponse::new(429, headers, Vec::new());
        assert!(response.retry_request_after.is_none());
    }

    #[test]
    fn test_ray_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("cf-ray".to_string(), vec!["7d3f1a2b3c4d5e6f-SJC".to_string()]);

        let response = HttpResponse::new(200, headers, Vec::new());
        assert_eq!(response.ray_id(), Some("7d3f1a2b3c4d5e6f-SJC"));
        assert_eq!(response.header("CF-Ray"), Some("7d3f1a2b3c4d5e6f-SJC"));
    }

    #[test]
    fn test_text_and_json_accessors() {
        let response = HttpResponse::new(200, HashMap::new(), br#"{"success":true}"#.to_vec());
        assert_eq!(response.text(), r#"{"success":true}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["success"], serde_json::Value::Bool(true));
    }
}
