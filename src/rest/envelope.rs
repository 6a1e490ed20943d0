//! The response envelope shared by every v4 endpoint.
//!
//! Every response body has the shape
//! `{success, errors, messages, result, result_info?}`. This module provides
//! the two generic shapes ([`Response`] and [`ListResponse`]), the
//! pagination cursor [`ResultInfo`], and the decoder that turns an
//! [`HttpResponse`] into one of them.
//!
//! # Decoding rules
//!
//! - The envelope header (`success`, `errors`, `messages`) is decoded first.
//!   A body without a readable header is an [`ErrorKind::Unmarshal`] error.
//! - `success=false` is an [`ErrorKind::Api`] error even on HTTP 2xx.
//! - `success=true` is a success even if `errors` is non-empty; the entries
//!   are kept on the returned envelope.
//! - The payload is decoded last; a mismatch is [`ErrorKind::Unmarshal`] and
//!   keeps the raw body.
//!
//! [`ErrorKind::Unmarshal`]: crate::ErrorKind::Unmarshal
//! [`ErrorKind::Api`]: crate::ErrorKind::Api

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::clients::{ApiError, Error, HttpResponse};

/// An entry of the envelope's `errors` or `messages` arrays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    /// Numeric code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Nested causes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_chain: Vec<ResponseInfo>,
}

impl fmt::Display for ResponseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// A single-result envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Error entries.
    #[serde(default)]
    pub errors: Vec<ResponseInfo>,
    /// Informational entries.
    #[serde(default)]
    pub messages: Vec<ResponseInfo>,
    /// The endpoint payload.
    pub result: T,
}

/// A list-result envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Error entries.
    #[serde(default)]
    pub errors: Vec<ResponseInfo>,
    /// Informational entries.
    #[serde(default)]
    pub messages: Vec<ResponseInfo>,
    /// The page of results. `null` decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<T>,
    /// Paging metadata, present on paged endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_info: Option<ResultInfo>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paging metadata (`result_info`) of a list response.
///
/// Pages are 1-based.
///
/// # Example
///
/// ```rust
/// use cloudflare_api::rest::ResultInfo;
///
/// let info = ResultInfo { page: 8, per_page: 50, total_pages: 8, count: 42, total_count: 392 };
/// assert!(info.done());
/// assert!(info.verify(42).is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    /// The current page number.
    #[serde(default)]
    pub page: u32,
    /// Items per page.
    #[serde(default)]
    pub per_page: u32,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Items on this page.
    #[serde(default)]
    pub count: u32,
    /// Items across all pages.
    #[serde(default, alias = "total")]
    pub total_count: u32,
}

impl ResultInfo {
    /// Returns `true` when there is no page after this one.
    #[must_use]
    pub const fn done(&self) -> bool {
        self.page >= self.total_pages || self.total_pages == 0
    }

    /// Returns the cursor for the following page.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..*self
        }
    }

    /// Fills in `total_pages` from `total_count` and `per_page` when the
    /// server left it out.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.total_pages == 0 && self.per_page > 0 && self.total_count > 0 {
            Self {
                total_pages: self.total_count.div_ceil(self.per_page),
                ..self
            }
        } else {
            self
        }
    }

    /// Summary for a response that carried no `result_info`: a single page
    /// holding `len` items.
    #[must_use]
    pub fn single_page(len: usize) -> Self {
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            page: 1,
            per_page: len,
            total_pages: u32::from(len > 0),
            count: len,
            total_count: len,
        }
    }

    /// Checks this page against the paging consistency rules.
    ///
    /// `len` is the number of items actually returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPage`] naming the first rule that failed.
    pub fn verify(&self, len: usize) -> Result<(), Error> {
        let invalid = |reason: String| Err(Error::InvalidPage { reason });

        let page = u64::from(self.page);
        let per_page = u64::from(self.per_page);
        let total_pages = u64::from(self.total_pages);
        let count = u64::from(self.count);
        let total = u64::from(self.total_count);

        if u64::try_from(len).map_or(true, |len| len != count) {
            return invalid(format!("count {count} does not match {len} results"));
        }

        if total_pages == 0 {
            if total != 0 || count != 0 {
                return invalid(format!(
                    "total_pages is 0 but total_count is {total} and count is {count}"
                ));
            }
            return Ok(());
        }

        if page == 0 || page > total_pages {
            return invalid(format!("page {page} outside 1..={total_pages}"));
        }

        if total_pages * per_page < total || total <= (total_pages - 1) * per_page {
            return invalid(format!(
                "total_count {total} not consistent with {total_pages} pages of {per_page}"
            ));
        }

        if page < total_pages {
            if count != per_page {
                return invalid(format!(
                    "page {page} of {total_pages} has {count} results, expected {per_page}"
                ));
            }
        } else {
            let expected = total - per_page * (page - 1);
            if count != expected {
                return invalid(format!(
                    "last page has {count} results, expected {expected}"
                ));
            }
        }

        Ok(())
    }
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    success: bool,
    #[serde(default)]
    errors: Vec<ResponseInfo>,
    #[serde(default)]
    messages: Vec<ResponseInfo>,
}

/// Decodes the envelope header and turns `success=false` into an error.
fn check_header(response: &HttpResponse, context: &str) -> Result<(), Error> {
    let header: EnvelopeHeader = serde_json::from_slice(&response.body)
        .map_err(|e| Error::unmarshal(context, &response.body, e))?;

    if !header.success {
        return Err(Error::Api(ApiError {
            status: response.code,
            errors: header.errors,
            messages: header.messages,
            ray_id: response.ray_id().map(String::from),
        }));
    }

    if !header.errors.is_empty() {
        tracing::warn!(
            context,
            errors = ?header.errors,
            "response reported success with errors"
        );
    }
    for message in &header.messages {
        tracing::debug!(context, code = message.code, "{}", message.message);
    }
    Ok(())
}

/// Decodes a single-result envelope.
///
/// # Errors
///
/// See the [module documentation](self).
pub fn decode_response<T: DeserializeOwned>(
    response: &HttpResponse,
    context: &str,
) -> Result<Response<T>, Error> {
    check_header(response, context)?;
    serde_json::from_slice(&response.body).map_err(|e| Error::unmarshal(context, &response.body, e))
}

/// Decodes a list-result envelope.
///
/// # Errors
///
/// See the [module documentation](self).
pub fn decode_list<T: DeserializeOwned>(
    response: &HttpResponse,
    context: &str,
) -> Result<ListResponse<T>, Error> {
    check_header(response, context)?;
    serde_json::from_slice(&response.body).map_err(|e| Error::unmarshal(context, &response.body, e))
}
