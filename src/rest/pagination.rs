//! Page-number pagination for list endpoints.
//!
//! List parameter blocks flatten a [`PaginationParams`] and implement
//! [`Paginated`]. [`list_all`] then runs in one of two modes:
//!
//! - **Manual**: both `page` and `per_page` are set. Exactly one request is
//!   made and its page is returned.
//! - **Automatic**: neither is set. Pages are fetched from page 1 with the
//!   endpoint's default page size until the last page has been read.
//!
//! Setting only one of the two is rejected with
//! [`Error::ManualPaginationRequired`] before any request is sent.
//!
//! Every page is checked with [`ResultInfo::verify`], so a server that
//! returns inconsistent paging metadata yields an error rather than a
//! silently truncated list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, RestClient};
use crate::rest::envelope::ResultInfo;
use crate::rest::query::encode_query;

/// Page size used by automatic pagination unless a resource overrides it.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Page selection shared by every paged list endpoint.
///
/// Flatten into a parameter block with `#[serde(flatten)]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// How a list call will be paged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationMode {
    /// Fetch every page.
    Automatic,
    /// Fetch a single page.
    Manual {
        /// Requested page.
        page: u32,
        /// Requested page size.
        per_page: u32,
    },
}

impl PaginationParams {
    /// Requests one specific page.
    #[must_use]
    pub const fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// Determines the paging mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManualPaginationRequired`] if exactly one of `page`
    /// and `per_page` is set.
    pub fn mode(&self) -> Result<PaginationMode, Error> {
        match (self.page, self.per_page) {
            (None, None) => Ok(PaginationMode::Automatic),
            (Some(page), Some(per_page)) => Ok(PaginationMode::Manual { page, per_page }),
            _ => Err(Error::ManualPaginationRequired),
        }
    }
}

/// A parameter block that carries [`PaginationParams`].
pub trait Paginated {
    /// Returns the current page selection.
    fn pagination(&self) -> PaginationParams;

    /// Replaces the page selection.
    fn set_pagination(&mut self, pagination: PaginationParams);
}

impl Paginated for PaginationParams {
    fn pagination(&self) -> PaginationParams {
        *self
    }

    fn set_pagination(&mut self, pagination: PaginationParams) {
        *self = pagination;
    }
}

/// Lists `path`, fetching one page or all pages depending on `params`.
///
/// Returns the collected items and the [`ResultInfo`] of the last page
/// read. Responses without `result_info` are treated as a single page.
///
/// # Errors
///
/// - [`Error::ManualPaginationRequired`] for a half-specified page
/// - [`Error::InvalidPage`] if a page's metadata is inconsistent or the
///   server answered with a different page than the one requested
/// - any transport, API, or unmarshal error from the requests
pub async fn list_all<T, P>(
    client: &RestClient,
    ctx: &Context,
    path: &str,
    params: &P,
    default_per_page: u32,
) -> Result<(Vec<T>, ResultInfo), Error>
where
    T: DeserializeOwned,
    P: Paginated + Serialize + Clone,
{
    let mut params = params.clone();
    let (automatic, mut requested) = match params.pagination().mode()? {
        PaginationMode::Manual { page, .. } => (false, page),
        PaginationMode::Automatic => {
            params.set_pagination(PaginationParams::page(1, default_per_page));
            (true, 1)
        }
    };

    let mut items = Vec::new();
    loop {
        let query = encode_query(&params)?;
        let response = client.get_list::<T>(ctx, path, Some(&query)).await?;

        let len = response.result.len();
        let info = match response.result_info {
            Some(info) => {
                if info.page != requested {
                    return Err(Error::InvalidPage {
                        reason: format!(
                            "requested page {requested} but received page {}",
                            info.page
                        ),
                    });
                }
                info.normalized()
            }
            None => ResultInfo::single_page(len),
        };
        info.verify(len)?;
        items.extend(response.result);

        if !automatic || info.done() {
            tracing::debug!(
                path,
                pages = info.page,
                items = items.len(),
                "finished listing"
            );
            return Ok((items, info));
        }

        requested = requested.saturating_add(1);
        params.set_pagination(PaginationParams::page(requested, default_per_page));
    }
}
