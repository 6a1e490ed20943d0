//! Product endpoint wrappers.
//!
//! Each wrapper is a pair of plain data types plus a path table. CRUD
//! resources implement [`Resource`](crate::rest::Resource); endpoints that
//! are addressed by something other than an id (phase entrypoints, the
//! zone itself, `/user`) expose inherent async functions instead.
//!
//! | Wrapper | Levels | Operations |
//! |---|---|---|
//! | [`DnsRecord`] | zones | get, list, create, update (PATCH), delete |
//! | [`CustomHostname`] | zones | get, list, create, update (PATCH), delete |
//! | [`LoadBalancerPool`] | accounts, user | get, list, create, update (PUT), delete |
//! | [`AccessServiceToken`] | accounts, zones | list, create, update, delete, refresh, rotate |
//! | [`IpPrefix`] | accounts | get, list, update (PATCH) |
//! | [`Ruleset`] | accounts, zones | get / update phase entrypoint |
//! | [`ZoneDetails`] | zones | get |
//! | [`UserDetails`] | user | get |

mod access_service_token;
mod custom_hostname;
mod dns_record;
mod ip_prefix;
mod load_balancer_pool;
mod ruleset;
mod user_details;
mod zone_details;

pub use access_service_token::{
    AccessServiceToken, AccessServiceTokenCreateParams, AccessServiceTokenListParams,
    AccessServiceTokenUpdateParams,
};
pub use custom_hostname::{
    CustomHostname, CustomHostnameCreateParams, CustomHostnameListParams, CustomHostnameSsl,
    CustomHostnameUpdateParams, OwnershipVerification,
};
pub use dns_record::{DnsRecord, DnsRecordCreateParams, DnsRecordListParams, DnsRecordUpdateParams};
pub use ip_prefix::{IpPrefix, IpPrefixUpdateParams};
pub use load_balancer_pool::{
    LoadBalancerOrigin, LoadBalancerPool, LoadBalancerPoolListParams, LoadBalancerPoolParams,
    LoadBalancerPoolUpdateParams,
};
pub use ruleset::{Ruleset, RulesetRule, UpdateEntrypointParams};
pub use user_details::UserDetails;
pub use zone_details::{ZoneAccount, ZoneDetails};
