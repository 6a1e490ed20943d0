//! The CRUD shape shared by endpoint wrappers.
//!
//! A wrapper declares its payload types and a [`ResourcePath`] table, and
//! gets `get`, `list`, `create`, `update`, and `delete` for free. Each
//! default method:
//!
//! 1. picks the path for the operation and checks the container level
//! 2. checks required identifiers (before any request is made)
//! 3. formats the URL from the container's fragment
//! 4. delegates to the transport through [`RestClient`]
//! 5. decodes the envelope and returns its `result`
//!
//! Operations without a path in the table fail with
//! [`Error::UnsupportedOperation`].
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudflare_api::rest::{Resource, ResourceContainer};
//! use cloudflare_api::rest::resources::{DnsRecord, DnsRecordListParams};
//!
//! let zone = ResourceContainer::zone("023e105f4ecef8ad9ca31a8372d0c353");
//! let params = DnsRecordListParams::default();
//! let (records, info) = DnsRecord::list(&client, &ctx, &zone, &params).await?;
//! println!("{} of {} records", records.len(), info.total_count);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, RestClient};
use crate::rest::container::ResourceContainer;
use crate::rest::envelope::ResultInfo;
use crate::rest::pagination::{list_all, Paginated, DEFAULT_PER_PAGE};
use crate::rest::path::{build_path, resolve_path, ResourceOperation, ResourcePath};

/// A parameter block addressing an existing object.
pub trait Identified {
    /// Returns the object's identifier.
    fn id(&self) -> &str;
}

/// The `result` of a delete call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedId {
    /// Identifier of the deleted object.
    #[serde(default)]
    pub id: String,
}

/// A product resource with the standard CRUD operations.
///
/// # Associated Types
///
/// - `CreateParams`: the create request body
/// - `UpdateParams`: the update request body, carrying the target id
/// - `ListParams`: list filters with flattened pagination
///
/// # Associated Constants
///
/// - `NAME`: used in error messages (e.g., `"DnsRecord"`)
/// - `PATHS`: one row per supported operation and container level
/// - `PER_PAGE`: page size for automatic pagination
#[allow(async_fn_in_trait)]
pub trait Resource: DeserializeOwned + Send + Sync + Sized {
    /// Request body for `create`.
    type CreateParams: Serialize + Send + Sync;

    /// Request body for `update`.
    type UpdateParams: Serialize + Identified + Send + Sync;

    /// Query parameters for `list`.
    type ListParams: Serialize + Paginated + Clone + Default + Send + Sync;

    /// The resource name used in error messages.
    const NAME: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Page size used when listing every page.
    const PER_PAGE: u32 = DEFAULT_PER_PAGE;

    /// Fetches one object by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] for an empty id, container
    /// errors, or any request error.
    async fn get(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        id: &str,
    ) -> Result<Self, Error> {
        let path = resolve_path(Self::NAME, Self::PATHS, ResourceOperation::Get, container)?;
        require_id::<Self>(ResourceOperation::Get, id)?;
        let url = build_path(container, path.template, &[("id", id)]);
        Ok(client.send::<Self>(ctx, path.http_method, &url, None).await?.result)
    }

    /// Lists objects, following pages unless `params` selects one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManualPaginationRequired`] for a half-specified
    /// page, container errors, or any request error.
    async fn list(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        params: &Self::ListParams,
    ) -> Result<(Vec<Self>, ResultInfo), Error> {
        let path = resolve_path(Self::NAME, Self::PATHS, ResourceOperation::List, container)?;
        let url = build_path(container, path.template, &[]);
        list_all(client, ctx, &url, params, Self::PER_PAGE).await
    }

    /// Creates an object.
    ///
    /// # Errors
    ///
    /// Returns container errors or any request error.
    async fn create(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        params: &Self::CreateParams,
    ) -> Result<Self, Error> {
        let path = resolve_path(Self::NAME, Self::PATHS, ResourceOperation::Create, container)?;
        let url = build_path(container, path.template, &[]);
        let body = serde_json::to_value(params)
            .map_err(|e| Error::validation(format!("cannot encode {} body: {e}", Self::NAME)))?;
        Ok(client.send::<Self>(ctx, path.http_method, &url, Some(body)).await?.result)
    }

    /// Updates the object named by `params.id()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] for an empty id, container
    /// errors, or any request error.
    async fn update(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        params: &Self::UpdateParams,
    ) -> Result<Self, Error> {
        let path = resolve_path(Self::NAME, Self::PATHS, ResourceOperation::Update, container)?;
        require_id::<Self>(ResourceOperation::Update, params.id())?;
        let url = build_path(container, path.template, &[("id", params.id())]);
        let body = serde_json::to_value(params)
            .map_err(|e| Error::validation(format!("cannot encode {} body: {e}", Self::NAME)))?;
        Ok(client.send::<Self>(ctx, path.http_method, &url, Some(body)).await?.result)
    }

    /// Deletes one object by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] for an empty id, container
    /// errors, or any request error.
    async fn delete(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        id: &str,
    ) -> Result<DeletedId, Error> {
        let path = resolve_path(Self::NAME, Self::PATHS, ResourceOperation::Delete, container)?;
        require_id::<Self>(ResourceOperation::Delete, id)?;
        let url = build_path(container, path.template, &[("id", id)]);
        Ok(client.send::<DeletedId>(ctx, path.http_method, &url, None).await?.result)
    }
}

fn require_id<R: Resource>(operation: ResourceOperation, id: &str) -> Result<(), Error> {
    if id.trim().is_empty() {
        return Err(Error::MissingIdentifier {
            operation: format!("{}::{}", R::NAME, operation.as_str()),
            field: "id",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::config::{ApiToken, BaseUrl};
    use crate::rest::container::ResourceLevel;
    use crate::rest::pagination::PaginationParams;
    use crate::{ClientConfig, ErrorKind};

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[allow(dead_code)]
        id: String,
    }

    #[derive(Serialize)]
    struct WidgetUpdate {
        #[serde(skip)]
        id: String,
    }

    impl Identified for WidgetUpdate {
        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Resource for Widget {
        type CreateParams = ();
        type UpdateParams = WidgetUpdate;
        type ListParams = PaginationParams;

        const NAME: &'static str = "Widget";
        const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &[ResourceLevel::Zone],
            "widgets/{id}",
        )];
    }

    // Nothing listens on the discard port; every check below must fail
    // before a request is attempted.
    fn client() -> RestClient {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("t").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .disable_rate_limit()
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_update_with_empty_id_is_rejected() {
        let params = WidgetUpdate { id: String::new() };
        let zone = ResourceContainer::zone("z");
        let error = Widget::update(&client(), &Context::background(), &zone, &params)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingIdentifier);
        assert!(error.to_string().contains("Widget::update"));
    }

    #[tokio::test]
    async fn test_missing_operation_is_unsupported() {
        let zone = ResourceContainer::zone("z");
        let error = Widget::delete(&client(), &Context::background(), &zone, "w1")
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::UnsupportedOperation {
                resource: "Widget",
                operation: "delete"
            }
        ));
    }

    #[tokio::test]
    async fn test_wrong_level_is_rejected() {
        let params = WidgetUpdate { id: "w1".to_string() };
        let user = ResourceContainer::user();
        let error = Widget::update(&client(), &Context::background(), &user, &params)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidResourceContainer);
    }

    #[test]
    fn test_deleted_id_tolerates_full_objects() {
        let deleted: DeletedId =
            serde_json::from_str(r#"{"id": "abc", "name": "gone"}"#).unwrap();
        assert_eq!(deleted.id, "abc");
    }
}
