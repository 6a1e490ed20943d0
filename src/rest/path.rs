//! Path building infrastructure for REST resources.
//!
//! Each resource declares a table of [`ResourcePath`]s: one row per
//! operation and accepted container level. The table drives three things
//! at once: which levels an operation accepts, which HTTP method it uses,
//! and how its URL is formed.
//!
//! URLs have the shape
//! `{container.url_fragment}/{template}` where the template carries
//! `{name}` placeholders for identifiers.
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::clients::HttpMethod;
//! use cloudflare_api::rest::{
//!     build_path, resolve_path, ResourceContainer, ResourceLevel, ResourceOperation, ResourcePath,
//! };
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Get,
//!         &[ResourceLevel::Account, ResourceLevel::User],
//!         "load_balancers/pools/{id}",
//!     ),
//! ];
//!
//! let container = ResourceContainer::account("01a7362d");
//! let path = resolve_path("LoadBalancerPool", PATHS, ResourceOperation::Get, &container).unwrap();
//! let url = build_path(&container, path.template, &[("id", "17b5962d")]);
//! assert_eq!(url, "accounts/01a7362d/load_balancers/pools/17b5962d");
//!
//! let zone = ResourceContainer::zone("023e105f");
//! assert!(resolve_path("LoadBalancerPool", PATHS, ResourceOperation::Get, &zone).is_err());
//! ```

use crate::clients::{Error, HttpMethod};
use crate::rest::container::{ResourceContainer, ResourceLevel};

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Read a single resource.
    Get,
    /// List resources.
    List,
    /// Create a resource.
    Create,
    /// Update a resource.
    Update,
    /// Delete a resource.
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for a REST resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Container levels this path is valid for.
    pub levels: &'static [ResourceLevel],
    /// The URL template, relative to the container fragment.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        levels: &'static [ResourceLevel],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            levels,
            template,
        }
    }

    /// Returns `true` if this path accepts `level`.
    #[must_use]
    pub fn accepts(&self, level: ResourceLevel) -> bool {
        self.levels.contains(&level)
    }
}

/// Selects the path for `operation` on `level`, if any.
#[must_use]
pub fn get_path(
    paths: &[ResourcePath],
    operation: ResourceOperation,
    level: ResourceLevel,
) -> Option<&ResourcePath> {
    paths
        .iter()
        .find(|p| p.operation == operation && p.accepts(level))
}

/// Selects the path for `operation` and validates `container` against it.
///
/// # Errors
///
/// - [`Error::UnsupportedOperation`] if `resource` has no path for the operation
/// - [`Error::InvalidResourceContainer`] if no path accepts the container level
/// - [`Error::MissingIdentifier`] if the container identifier is empty
pub fn resolve_path<'a>(
    resource: &'static str,
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    container: &ResourceContainer,
) -> Result<&'a ResourcePath, Error> {
    let mut accepted: Vec<ResourceLevel> = Vec::new();
    for path in paths.iter().filter(|p| p.operation == operation) {
        for level in path.levels {
            if !accepted.contains(level) {
                accepted.push(*level);
            }
        }
    }

    if accepted.is_empty() {
        return Err(Error::UnsupportedOperation {
            resource,
            operation: operation.as_str(),
        });
    }

    container.require(&format!("{resource}::{}", operation.as_str()), &accepted)?;

    get_path(paths, operation, container.level()).ok_or_else(|| Error::InvalidResourceContainer {
        operation: format!("{resource}::{}", operation.as_str()),
        level: container.level(),
    })
}

/// Builds `{container fragment}/{template}`, replacing `{name}`
/// placeholders with percent-encoded values from `ids`.
#[must_use]
pub fn build_path(container: &ResourceContainer, template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    if result.is_empty() {
        container.url_fragment()
    } else {
        format!("{}/{result}", container.url_fragment())
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const PATHS: &[ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &[ResourceLevel::Account, ResourceLevel::Zone],
            "access/service_tokens",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[ResourceLevel::Account],
            "access/service_tokens",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[ResourceLevel::Zone],
            "access/service_tokens",
        ),
    ];

    #[test]
    fn test_resource_path_stores_fields_correctly() {
        let path = PATHS[0];
        assert_eq!(path.http_method, HttpMethod::Get);
        assert_eq!(path.operation, ResourceOperation::List);
        assert!(path.accepts(ResourceLevel::Zone));
        assert!(!path.accepts(ResourceLevel::User));
    }

    #[test]
    fn test_get_path_matches_operation_and_level() {
        let path = get_path(PATHS, ResourceOperation::Create, ResourceLevel::Zone).unwrap();
        assert_eq!(path.levels, &[ResourceLevel::Zone]);
        assert!(get_path(PATHS, ResourceOperation::Create, ResourceLevel::User).is_none());
    }

    #[test]
    fn test_resolve_path_reports_unsupported_operation() {
        let error = resolve_path(
            "AccessServiceToken",
            PATHS,
            ResourceOperation::Get,
            &ResourceContainer::account("abc"),
        )
        .unwrap_err();
        assert!(matches!(error, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_resolve_path_rejects_foreign_level() {
        let error = resolve_path(
            "AccessServiceToken",
            PATHS,
            ResourceOperation::Create,
            &ResourceContainer::user(),
        )
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidResourceContainer);
        assert!(error.to_string().starts_with("AccessServiceToken::create"));
    }

    #[test]
    fn test_build_path_interpolates_and_encodes() {
        let container = ResourceContainer::zone("023e105f");
        assert_eq!(
            build_path(&container, "dns_records/{id}", &[("id", "372e6795")]),
            "zones/023e105f/dns_records/372e6795"
        );
        assert_eq!(
            build_path(&container, "rulesets/phases/{phase}/entrypoint", &[("phase", "a/b")]),
            "zones/023e105f/rulesets/phases/a%2Fb/entrypoint"
        );
        assert_eq!(build_path(&container, "", &[]), "zones/023e105f");
        assert_eq!(build_path(&ResourceContainer::user(), "", &[]), "user");
    }
}
