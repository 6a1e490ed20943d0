//! DNS record resource implementation.
//!
//! This module provides the [`DnsRecord`] resource for managing the records
//! of a zone. Records only exist at the zone level.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudflare_api::rest::{Resource, ResourceContainer};
//! use cloudflare_api::rest::resources::{DnsRecord, DnsRecordCreateParams, DnsRecordListParams};
//!
//! let zone = ResourceContainer::zone("023e105f4ecef8ad9ca31a8372d0c353");
//!
//! let record = DnsRecord::create(&client, &ctx, &zone, &DnsRecordCreateParams {
//!     record_type: "A".to_string(),
//!     name: "www.example.com".to_string(),
//!     content: "198.51.100.4".to_string(),
//!     proxied: Some(true),
//!     ..Default::default()
//! }).await?;
//!
//! let params = DnsRecordListParams { record_type: Some("A".to_string()), ..Default::default() };
//! let (records, _) = DnsRecord::list(&client, &ctx, &zone, &params).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    Identified, Paginated, PaginationParams, Resource, ResourceLevel, ResourceOperation,
    ResourcePath,
};

const ZONE: &[ResourceLevel] = &[ResourceLevel::Zone];

/// A DNS record in a zone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DnsRecord {
    /// Record identifier.
    #[serde(default)]
    pub id: String,

    /// Record type (`A`, `AAAA`, `CNAME`, `MX`, `TXT`, ...).
    #[serde(rename = "type", default)]
    pub record_type: String,

    /// Fully qualified record name.
    #[serde(default)]
    pub name: String,

    /// Record content, e.g. an IPv4 address for `A` records.
    #[serde(default)]
    pub content: String,

    /// Whether the record can be proxied.
    #[serde(default)]
    pub proxiable: bool,

    /// Whether the record is proxied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Time to live in seconds; `1` means automatic.
    #[serde(default)]
    pub ttl: u32,

    /// Priority for `MX`, `SRV` and `URI` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// `name:value` tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Structured content for record types such as `SRV` or `CAA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// When the record was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    /// When the record was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

impl Resource for DnsRecord {
    type CreateParams = DnsRecordCreateParams;
    type UpdateParams = DnsRecordUpdateParams;
    type ListParams = DnsRecordListParams;

    const NAME: &'static str = "DnsRecord";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, ZONE, "dns_records/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, ZONE, "dns_records"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, ZONE, "dns_records"),
        ResourcePath::new(HttpMethod::Patch, ResourceOperation::Update, ZONE, "dns_records/{id}"),
        ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, ZONE, "dns_records/{id}"),
    ];

    const PER_PAGE: u32 = 100;
}

/// Body for creating a DNS record.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DnsRecordCreateParams {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Fully qualified record name.
    pub name: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether to proxy the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Record priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `name:value` tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body for patching a DNS record. Only the fields that are set are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DnsRecordUpdateParams {
    /// The record to update.
    #[serde(skip)]
    pub id: String,
    /// Record type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Fully qualified record name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Record content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Time to live in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether to proxy the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Record priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Free-form comment; `Some(String::new())` clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `name:value` tags; `Some(vec![])` clears them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Identified for DnsRecordUpdateParams {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Filters for listing DNS records.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DnsRecordListParams {
    /// Only records of this type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Only records with this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only records with this content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Only proxied or unproxied records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Only records carrying these tags.
    #[serde(rename = "tag", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// `all` or `any`.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<String>,
    /// Field to order by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// `asc` or `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Page selection.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Paginated for DnsRecordListParams {
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
    use crate::rest::query::encode_query;
    use crate::rest::{get_path, ResourceContainer};
    use serde_json::json;

    #[test]
    fn test_dns_record_deserialization() {
        let record: DnsRecord = serde_json::from_value(json!({
            "id": "372e67954025e0ba6aaa6d586b9e0b59",
            "type": "A",
            "name": "example.com",
            "content": "198.51.100.4",
            "proxiable": true,
            "proxied": false,
            "ttl": 3600,
            "tags": ["owner:dns-team"],
            "created_on": "2014-01-01T05:20:00.12345Z"
        }))
        .unwrap();

        assert_eq!(record.record_type, "A");
        assert_eq!(record.proxied, Some(false));
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.tags, vec!["owner:dns-team"]);
        assert!(record.created_on.is_some());
    }

    #[test]
    fn test_update_params_omit_unset_fields_and_id() {
        let params = DnsRecordUpdateParams {
            id: "372e6795".to_string(),
            proxied: Some(false),
            comment: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"proxied": false, "comment": ""})
        );
    }

    #[test]
    fn test_list_params_query() {
        let params = DnsRecordListParams {
            record_type: Some("TXT".to_string()),
            tags: vec!["a:1".to_string(), "b:2".to_string()],
            match_mode: Some("any".to_string()),
            pagination: PaginationParams::page(2, 20),
            ..Default::default()
        };
        assert_eq!(
            encode_query(&params).unwrap(),
            "match=any&page=2&per_page=20&tag=a%3A1&tag=b%3A2&type=TXT"
        );
    }

    #[test]
    fn test_dns_record_paths_are_zone_only() {
        for operation in [
            ResourceOperation::Get,
            ResourceOperation::List,
            ResourceOperation::Create,
            ResourceOperation::Update,
            ResourceOperation::Delete,
        ] {
            assert!(get_path(DnsRecord::PATHS, operation, ResourceLevel::Zone).is_some());
            assert!(get_path(DnsRecord::PATHS, operation, ResourceLevel::Account).is_none());
        }
        let update =
            get_path(DnsRecord::PATHS, ResourceOperation::Update, ResourceLevel::Zone).unwrap();
        assert_eq!(update.http_method, HttpMethod::Patch);
        assert_eq!(
            crate::rest::build_path(
                &ResourceContainer::zone("z1"),
                update.template,
                &[("id", "r1")],
            ),
            "zones/z1/dns_records/r1"
        );
    }
}
