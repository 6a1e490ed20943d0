//! IP prefix resource implementation.
//!
//! Bring-your-own-IP prefixes are account resources. Only the description
//! can be changed through the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    Identified, PaginationParams, Resource, ResourceLevel, ResourceOperation, ResourcePath,
};

const ACCOUNT: &[ResourceLevel] = &[ResourceLevel::Account];

/// An IP prefix owned by an account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IpPrefix {
    /// Prefix identifier.
    #[serde(default)]
    pub id: String,
    /// Owning account.
    #[serde(default)]
    pub account_id: String,
    /// The prefix, e.g. `192.0.2.0/24`.
    #[serde(default)]
    pub cidr: String,
    /// Autonomous system number announcing the prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<u32>,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Approval state (`P`, `V`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<String>,
    /// Whether advertisement can be toggled on demand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_demand_enabled: Option<bool>,
    /// Whether the prefix is advertised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised: Option<bool>,
    /// When the prefix was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the prefix was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Resource for IpPrefix {
    type CreateParams = ();
    type UpdateParams = IpPrefixUpdateParams;
    type ListParams = PaginationParams;

    const NAME: &'static str = "IpPrefix";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            ACCOUNT,
            "addressing/prefixes/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, ACCOUNT, "addressing/prefixes"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            ACCOUNT,
            "addressing/prefixes/{id}",
        ),
    ];
}

/// Body for updating a prefix description.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct IpPrefixUpdateParams {
    /// The prefix to update.
    #[serde(skip)]
    pub id: String,
    /// New description. An empty string is sent as-is.
    pub description: String,
}

impl Identified for IpPrefixUpdateParams {
    fn id(&self) -> &str {
        &self.id
    }
}
