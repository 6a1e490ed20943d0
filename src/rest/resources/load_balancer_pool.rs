//! Load balancer pool resource implementation.
//!
//! Pools group origin servers behind a load balancer. They are owned by an
//! account or by the user; zone containers are rejected.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    Identified, Paginated, PaginationParams, Resource, ResourceLevel, ResourceOperation,
    ResourcePath,
};

const OWNERS: &[ResourceLevel] = &[ResourceLevel::Account, ResourceLevel::User];

/// A load balancer pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoadBalancerPool {
    /// Pool identifier.
    #[serde(default)]
    pub id: String,

    /// Short name, unique per owner.
    #[serde(default)]
    pub name: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the pool receives traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Healthy origins required for the pool to be healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_origins: Option<u32>,

    /// Monitor identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,

    /// Origins in the pool.
    #[serde(default)]
    pub origins: Vec<LoadBalancerOrigin>,

    /// Address notified on health changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,

    /// Regions health checks run from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub check_regions: Vec<String>,

    /// When the pool was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    /// When the pool was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// An origin server inside a pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoadBalancerOrigin {
    /// Origin name.
    pub name: String,
    /// IP address or hostname.
    pub address: String,
    /// Whether the origin receives traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Relative weight; `Some(0.0)` drains the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Request headers sent to this origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HashMap<String, Vec<String>>>,
}

impl Resource for LoadBalancerPool {
    type CreateParams = LoadBalancerPoolParams;
    type UpdateParams = LoadBalancerPoolUpdateParams;
    type ListParams = LoadBalancerPoolListParams;

    const NAME: &'static str = "LoadBalancerPool";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            OWNERS,
            "load_balancers/pools/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, OWNERS, "load_balancers/pools"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            OWNERS,
            "load_balancers/pools",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            OWNERS,
            "load_balancers/pools/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            OWNERS,
            "load_balancers/pools/{id}",
        ),
    ];
}

/// Body for creating a pool.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct LoadBalancerPoolParams {
    /// Short name.
    pub name: String,
    /// Origins in the pool.
    pub origins: Vec<LoadBalancerOrigin>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the pool receives traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Healthy origins required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_origins: Option<u32>,
    /// Monitor identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    /// Address notified on health changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
}

/// Body for replacing a pool.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct LoadBalancerPoolUpdateParams {
    /// The pool to replace.
    #[serde(skip)]
    pub id: String,
    /// The new pool definition.
    #[serde(flatten)]
    pub pool: LoadBalancerPoolParams,
}

impl Identified for LoadBalancerPoolUpdateParams {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Filters for listing pools.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct LoadBalancerPoolListParams {
    /// Only pools using this monitor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    /// Page selection.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Paginated for LoadBalancerPoolListParams {
    fn pagination(&self) -> PaginationParams {
        self.pagination
    }

    fn set_pagination(&mut self, pagination: PaginationParams) {
        self.pagination = pagination;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{build_path, get_path, ResourceContainer};
    use serde_json::json;

    #[test]
    fn test_pool_paths_reject_zone_level() {
        let paths = LoadBalancerPool::PATHS;
        assert!(get_path(paths, ResourceOperation::Create, ResourceLevel::Zone).is_none());
        let path = get_path(paths, ResourceOperation::List, ResourceLevel::User).unwrap();
        assert_eq!(
            build_path(&ResourceContainer::user(), path.template, &[]),
            "user/load_balancers/pools"
        );
    }

    #[test]
    fn test_update_uses_put() {
        let paths = LoadBalancerPool::PATHS;
        let path = get_path(paths, ResourceOperation::Update, ResourceLevel::Account).unwrap();
        assert_eq!(path.http_method, HttpMethod::Put);
    }

    #[test]
    fn test_zero_weight_is_sent() {
        let origin = LoadBalancerOrigin {
            name: "app-1".to_string(),
            address: "198.51.100.1".to_string(),
            weight: Some(0.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&origin).unwrap(),
            json!({"name": "app-1", "address": "198.51.100.1", "weight": 0.0})
        );
    }

    #[test]
    fn test_update_body_flattens_pool() {
        let params = LoadBalancerPoolUpdateParams {
            id: "17b5962d775c646f3f9725cbc7a53df4".to_string(),
            pool: LoadBalancerPoolParams {
                name: "primary".to_string(),
                enabled: Some(false),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"name": "primary", "origins": [], "enabled": false})
        );
    }
}
