//! REST infrastructure for the Cloudflare v4 API.
//!
//! This module provides the pieces every endpoint wrapper is built from:
//!
//! - **[`ResourceContainer`]**: the account, zone, or user scope of a call
//! - **[`ResourcePath`] tables**: which levels and HTTP method each
//!   operation uses, and how its URL is formed
//! - **Envelope decoding**: [`Response`], [`ListResponse`], and the
//!   [`ResultInfo`] pagination cursor
//! - **Pagination**: [`list_all`] with manual and automatic modes
//! - **Query encoding**: [`query::encode_query`]
//! - **[`Resource`] trait**: default async CRUD operations
//! - **[`resources`]**: the product wrappers
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudflare_api::{ApiToken, ClientConfig, Context, RestClient};
//! use cloudflare_api::rest::{Resource, ResourceContainer};
//! use cloudflare_api::rest::resources::{LoadBalancerPool, LoadBalancerPoolListParams};
//!
//! let config = ClientConfig::builder().api_token(ApiToken::new("token")?).build()?;
//! let client = RestClient::new(&config)?;
//! let ctx = Context::background();
//!
//! let account = ResourceContainer::account("01a7362d577a6c3019a474fd6f485823");
//! let params = LoadBalancerPoolListParams::default();
//! let (pools, _) = LoadBalancerPool::list(&client, &ctx, &account, &params).await?;
//!
//! // Pools cannot be addressed through a zone; this fails without a request.
//! let zone = ResourceContainer::zone("023e105f4ecef8ad9ca31a8372d0c353");
//! assert!(LoadBalancerPool::list(&client, &ctx, &zone, &params).await.is_err());
//! ```

mod container;
mod envelope;
mod pagination;
mod path;
mod resource;

pub mod query;
pub mod resources;

pub use container::{ResourceContainer, ResourceLevel};
pub use envelope::{decode_list, decode_response, ListResponse, Response, ResponseInfo, ResultInfo};
pub use pagination::{list_all, Paginated, PaginationMode, PaginationParams, DEFAULT_PER_PAGE};
pub use path::{build_path, get_path, resolve_path, ResourceOperation, ResourcePath};
pub use resource::{DeletedId, Identified, Resource};
