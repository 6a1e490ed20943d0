//! Access service token resource implementation.
//!
//! Service tokens authenticate automated clients against Access
//! applications. They exist at the account and zone levels. Besides the
//! usual CRUD operations a token can be refreshed (extending its expiry) or
//! rotated (issuing a new client secret).
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudflare_api::rest::{Resource, ResourceContainer};
//! use cloudflare_api::rest::resources::{AccessServiceToken, AccessServiceTokenCreateParams};
//!
//! let account = ResourceContainer::account("01a7362d577a6c3019a474fd6f485823");
//! let params = AccessServiceTokenCreateParams {
//!     name: "ci".to_string(),
//!     ..Default::default()
//! };
//! let token = AccessServiceToken::create(&client, &ctx, &account, &params).await?;
//!
//! // The secret is only returned on create and rotate.
//! let rotated = AccessServiceToken::rotate(&client, &ctx, &account, &token.id).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, HttpMethod, RestClient};
use crate::rest::{
    build_path, Identified, Paginated, PaginationParams, Resource, ResourceContainer, ResourceLevel,
    ResourceOperation, ResourcePath,
};

const SCOPES: &[ResourceLevel] = &[ResourceLevel::Account, ResourceLevel::Zone];

/// An Access service token.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AccessServiceToken {
    /// Token identifier (a UUID).
    #[serde(default)]
    pub id: String,

    /// Token name.
    #[serde(default)]
    pub name: String,

    /// Client id sent in `CF-Access-Client-Id`.
    #[serde(default)]
    pub client_id: String,

    /// Client secret. Present only in create and rotate responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Lifetime, e.g. `8760h`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// When the token expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// When the token was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the token was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for AccessServiceToken {
    type CreateParams = AccessServiceTokenCreateParams;
    type UpdateParams = AccessServiceTokenUpdateParams;
    type ListParams = AccessServiceTokenListParams;

    const NAME: &'static str = "AccessServiceToken";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            SCOPES,
            "access/service_tokens",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            SCOPES,
            "access/service_tokens",
        ),
        ResourcePath::new(
            HttpMethod::Put,
            ResourceOperation::Update,
            SCOPES,
            "access/service_tokens/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            SCOPES,
            "access/service_tokens/{id}",
        ),
    ];
}

impl AccessServiceToken {
    /// Extends the token's expiry by its configured duration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty `uuid`, container errors, or
    /// any request error.
    pub async fn refresh(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        uuid: &str,
    ) -> Result<Self, Error> {
        Self::token_action(client, ctx, container, uuid, "refresh").await
    }

    /// Issues a new client secret, invalidating the old one.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty `uuid`, container errors, or
    /// any request error.
    pub async fn rotate(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        uuid: &str,
    ) -> Result<Self, Error> {
        Self::token_action(client, ctx, container, uuid, "rotate").await
    }

    async fn token_action(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        uuid: &str,
        action: &str,
    ) -> Result<Self, Error> {
        container.require(&format!("{}::{action}", Self::NAME), SCOPES)?;
        if uuid.trim().is_empty() {
            return Err(Error::validation(
                "missing required access service token UUID",
            ));
        }
        let url = build_path(
            container,
            "access/service_tokens/{id}/{action}",
            &[("id", uuid), ("action", action)],
        );
        Ok(client.send::<Self>(ctx, HttpMethod::Post, &url, None).await?.result)
    }
}

/// Body for creating a service token.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AccessServiceTokenCreateParams {
    /// Token name.
    pub name: String,
    /// Lifetime, e.g. `8760h` or `forever`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Body for updating a service token.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AccessServiceTokenUpdateParams {
    /// The token to update.
    #[serde(skip)]
    pub uuid: String,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New lifetime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Identified for AccessServiceTokenUpdateParams {
    fn id(&self) -> &str {
        &self.uuid
    }
}

/// Filters for listing service tokens.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AccessServiceTokenListParams {
    /// Only tokens with this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Substring search on name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page selection.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl Paginated for AccessServiceTokenListParams {
    fn pagination(&self) -> PaginationParams {
        self.pagination
    }

    fn set_pagination(&mut self, pagination: PaginationParams) {
        self.pagination = pagination;
    }
}
