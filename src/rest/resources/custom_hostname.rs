//! Custom hostname resource implementation.
//!
//! Custom hostnames let a SaaS zone serve traffic for hostnames owned by its
//! customers. They live at the zone level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{
    Identified, Paginated, PaginationParams, Resource, ResourceLevel, ResourceOperation,
    ResourcePath,
};

const ZONE: &[ResourceLevel] = &[ResourceLevel::Zone];

/// A custom hostname attached to a SaaS zone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CustomHostname {
    /// Custom hostname identifier.
    #[serde(default)]
    pub id: String,

    /// The hostname, e.g. `app.customer.com`.
    #[serde(default)]
    pub hostname: String,

    /// Certificate settings and status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<CustomHostnameSsl>,

    /// Origin to route to instead of the zone's fallback origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_origin_server: Option<String>,

    /// Arbitrary metadata forwarded to workers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Map<String, serde_json::Value>>,

    /// Hostname status (`pending`, `active`, `moved`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Verification problems reported for the hostname.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verification_errors: Vec<String>,

    /// Ownership verification record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership_verification: Option<OwnershipVerification>,

    /// When the hostname was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Certificate configuration of a custom hostname.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomHostnameSsl {
    /// Certificate identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Certificate status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Domain control validation method (`http`, `txt`, `email`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Certificate type (`dv`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<String>,
    /// Whether the certificate also covers `*.hostname`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<bool>,
    /// Certificate authority (`digicert`, `google`, `lets_encrypt`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,
}

/// A DNS record proving ownership of a custom hostname.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OwnershipVerification {
    /// Record type.
    #[serde(rename = "type", default)]
    pub record_type: String,
    /// Record name.
    #[serde(default)]
    pub name: String,
    /// Record value.
    #[serde(default)]
    pub value: String,
}

impl Resource for CustomHostname {
    type CreateParams = CustomHostnameCreateParams;
    type UpdateParams = CustomHostnameUpdateParams;
    type ListParams = CustomHostnameListParams;

    const NAME: &'static str = "CustomHostname";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, ZONE, "custom_hostnames/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, ZONE, "custom_hostnames"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, ZONE, "custom_hostnames"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            ZONE,
            "custom_hostnames/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            ZONE,
            "custom_hostnames/{id}",
        ),
    ];
}

/// Body for creating a custom hostname.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CustomHostnameCreateParams {
    /// The hostname.
    pub hostname: String,
    /// Certificate settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<CustomHostnameSsl>,
    /// Origin override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_origin_server: Option<String>,
    /// Metadata forwarded to workers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Body for patching a custom hostname.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CustomHostnameUpdateParams {
    /// The custom hostname to update.
    #[serde(skip)]
    pub id: String,
    /// Certificate settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<CustomHostnameSsl>,
    /// Origin override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_origin_server: Option<String>,
    /// Metadata forwarded to workers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Identified for CustomHostnameUpdateParams {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Filters for listing custom hostnames.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomHostnameListParams {
    /// Only this hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Only the hostname with this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Only hostnames with (`1`) or without (`0`) certificates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<u8>,
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

impl Paginated for CustomHostnameListParams {
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
    use serde_json::json;

    #[test]
    fn test_custom_hostname_deserialization() {
        let hostname: CustomHostname = serde_json::from_value(json!({
            "id": "0d89c70d-ad9f-4843-b99f-6cc0252067e9",
            "hostname": "app.example.com",
            "ssl": {
                "status": "pending_validation",
                "method": "http",
                "type": "dv",
                "wildcard": false
            },
            "status": "pending",
            "ownership_verification": {
                "type": "txt",
                "name": "_cf-custom-hostname.app.example.com",
                "value": "5cc07c04"
            },
            "created_at": "2020-02-06T18:11:23.531995Z"
        }))
        .unwrap();

        let ssl = hostname.ssl.unwrap();
        assert_eq!(ssl.certificate_type.as_deref(), Some("dv"));
        assert_eq!(ssl.wildcard, Some(false));
        assert_eq!(hostname.ownership_verification.unwrap().record_type, "txt");
    }

    #[test]
    fn test_create_params_body() {
        let params = CustomHostnameCreateParams {
            hostname: "app.example.com".to_string(),
            ssl: Some(CustomHostnameSsl {
                method: Some("http".to_string()),
                certificate_type: Some("dv".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"hostname": "app.example.com", "ssl": {"method": "http", "type": "dv"}})
        );
    }

    #[test]
    fn test_list_params_keep_zero_ssl_filter() {
        let params = CustomHostnameListParams {
            ssl: Some(0),
            ..Default::default()
        };
        assert_eq!(encode_query(&params).unwrap(), "ssl=0");
    }
}
