//! The authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, HttpMethod, RestClient};
use crate::rest::ResourceContainer;

/// Profile of the user owning the credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserDetails {
    /// User identifier.
    #[serde(default)]
    pub id: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    /// Whether 2FA is enabled.
    #[serde(default)]
    pub two_factor_authentication_enabled: bool,
    /// Whether the user is suspended.
    #[serde(default)]
    pub suspended: bool,
    /// Beta programs the user joined.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub betas: Vec<String>,
    /// When the user was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// When the user was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

impl UserDetails {
    /// Fetches `/user`.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get(client: &RestClient, ctx: &Context) -> Result<Self, Error> {
        let url = ResourceContainer::user().url_fragment();
        Ok(client.send::<Self>(ctx, HttpMethod::Get, &url, None).await?.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_details_deserialization() {
        let user: UserDetails = serde_json::from_str(
            r#"{
                "id": "7c5dae5552338874e5053f2534d2767a",
                "email": "user@example.com",
                "first_name": "John",
                "two_factor_authentication_enabled": true,
                "betas": ["mirage_forever"]
            }"#,
        )
        .unwrap();
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert!(user.last_name.is_none());
        assert!(user.two_factor_authentication_enabled);
    }
}
