//! Zone details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, HttpMethod, RestClient};
use crate::rest::{build_path, ResourceContainer, ResourceLevel};

/// Properties of a zone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ZoneDetails {
    /// Zone identifier.
    #[serde(default)]
    pub id: String,
    /// Domain name.
    #[serde(default)]
    pub name: String,
    /// Zone status (`active`, `pending`, ...).
    #[serde(default)]
    pub status: String,
    /// Whether the zone is paused.
    #[serde(default)]
    pub paused: bool,
    /// Setup type (`full`, `partial`, `secondary`).
    #[serde(rename = "type", default)]
    pub zone_type: String,
    /// Seconds of development mode remaining; negative once expired.
    #[serde(default)]
    pub development_mode: i64,
    /// Assigned name servers.
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Name servers before moving to Cloudflare.
    #[serde(default)]
    pub original_name_servers: Option<Vec<String>>,
    /// Registrar before moving to Cloudflare.
    #[serde(default)]
    pub original_registrar: Option<String>,
    /// Owning account.
    #[serde(default)]
    pub account: ZoneAccount,
    /// Permissions of the caller on this zone.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Partial-setup verification key. Undocumented, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_key: Option<serde_json::Value>,
    /// When the zone was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// When the zone was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
    /// When the zone was activated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_on: Option<DateTime<Utc>>,
}

/// The account a zone belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ZoneAccount {
    /// Account identifier.
    #[serde(default)]
    pub id: String,
    /// Account name.
    #[serde(default)]
    pub name: String,
}

impl ZoneDetails {
    /// Fetches the zone named by `container`.
    ///
    /// # Errors
    ///
    /// Returns container errors for a non-zone container or any request
    /// error.
    pub async fn get(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
    ) -> Result<Self, Error> {
        container.require("ZoneDetails::get", &[ResourceLevel::Zone])?;
        let url = build_path(container, "", &[]);
        Ok(client.send::<Self>(ctx, HttpMethod::Get, &url, None).await?.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verification_key_is_opaque() {
        let zone: ZoneDetails = serde_json::from_value(json!({
            "id": "023e105f4ecef8ad9ca31a8372d0c353",
            "name": "example.com",
            "status": "pending",
            "type": "partial",
            "account": {"id": "01a7362d577a6c3019a474fd6f485823", "name": "Demo"},
            "verification_key": {"value": "284344499-1084221259", "nested": [1, 2]}
        }))
        .unwrap();

        assert_eq!(zone.zone_type, "partial");
        assert_eq!(zone.account.name, "Demo");
        assert_eq!(
            zone.verification_key,
            Some(json!({"value": "284344499-1084221259", "nested": [1, 2]}))
        );
    }

    #[test]
    fn test_missing_verification_key_round_trips_as_absent() {
        let zone: ZoneDetails =
            serde_json::from_value(json!({"id": "z", "name": "example.com"})).unwrap();
        assert!(zone.verification_key.is_none());
        let encoded = serde_json::to_value(&zone).unwrap();
        assert!(encoded.get("verification_key").is_none());
    }
}
