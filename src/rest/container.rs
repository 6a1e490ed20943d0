//! Resource containers: the scope (account, zone or user) an operation
//! addresses.
//!
//! Endpoints declare the levels they accept and call
//! [`ResourceContainer::require`] before building a URL, so a wrong scope
//! fails without a request being sent.
//!
//! # Example
//!
//! ```rust
//! use cloudflare_api::rest::{ResourceContainer, ResourceLevel};
//!
//! let zone = ResourceContainer::zone("023e105f4ecef8ad9ca31a8372d0c353");
//! assert_eq!(zone.url_fragment(), "zones/023e105f4ecef8ad9ca31a8372d0c353");
//!
//! let user = ResourceContainer::user();
//! assert_eq!(user.url_fragment(), "user");
//!
//! // Load balancer pools live on accounts and users, never on zones.
//! let accepted = [ResourceLevel::Account, ResourceLevel::User];
//! assert!(zone.require("LoadBalancerPool::create", &accepted).is_err());
//! assert!(user.require("LoadBalancerPool::create", &accepted).is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::clients::Error;

/// The level of a [`ResourceContainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceLevel {
    /// `accounts/<id>`
    Account,
    /// `zones/<id>`
    Zone,
    /// `user`
    User,
}

impl ResourceLevel {
    /// Returns the URL segment of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "accounts",
            Self::Zone => "zones",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scope-tagged identifier naming where a resource lives.
///
/// The level is fixed at construction. The identifier is empty for
/// [`ResourceLevel::User`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceContainer {
    level: ResourceLevel,
    identifier: String,
}

impl ResourceContainer {
    /// An account-scoped container.
    #[must_use]
    pub fn account(id: impl Into<String>) -> Self {
        Self {
            level: ResourceLevel::Account,
            identifier: id.into(),
        }
    }

    /// A zone-scoped container.
    #[must_use]
    pub fn zone(id: impl Into<String>) -> Self {
        Self {
            level: ResourceLevel::Zone,
            identifier: id.into(),
        }
    }

    /// The user-scoped container.
    #[must_use]
    pub const fn user() -> Self {
        Self {
            level: ResourceLevel::User,
            identifier: String::new(),
        }
    }

    /// Returns the level.
    #[must_use]
    pub const fn level(&self) -> ResourceLevel {
        self.level
    }

    /// Returns the identifier (empty for the user level).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns `user` or `<level>/<identifier>`.
    #[must_use]
    pub fn url_fragment(&self) -> String {
        match self.level {
            ResourceLevel::User => ResourceLevel::User.as_str().to_string(),
            level => format!("{}/{}", level.as_str(), self.identifier),
        }
    }

    /// Checks that this container may be used for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResourceContainer`] if the level is not in
    /// `accepted`, or [`Error::MissingIdentifier`] if an account or zone
    /// container has an empty identifier.
    pub fn require(&self, operation: &str, accepted: &[ResourceLevel]) -> Result<(), Error> {
        if !accepted.contains(&self.level) {
            return Err(Error::InvalidResourceContainer {
                operation: operation.to_string(),
                level: self.level,
            });
        }
        if self.level != ResourceLevel::User && self.identifier.trim().is_empty() {
            return Err(Error::MissingIdentifier {
                operation: operation.to_string(),
                field: match self.level {
                    ResourceLevel::Zone => "zone ID",
                    _ => "account ID",
                },
            });
        }
        Ok(())
    }
}

impl fmt::Display for ResourceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_fragment())
    }
}

impl FromStr for ResourceContainer {
    type Err = Error;

    /// Parses `user`, `accounts/<id>` or `zones/<id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        if s == "user" {
            return Ok(Self::user());
        }
        match s.split_once('/') {
            Some(("accounts", id)) if !id.is_empty() && !id.contains('/') => Ok(Self::account(id)),
            Some(("zones", id)) if !id.is_empty() && !id.contains('/') => Ok(Self::zone(id)),
            _ => Err(Error::validation(format!(
                "invalid resource container '{s}': expected 'user', 'accounts/<id>' or 'zones/<id>'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const ALL: [ResourceLevel; 3] = [
        ResourceLevel::Account,
        ResourceLevel::Zone,
        ResourceLevel::User,
    ];

    #[test]
    fn test_url_fragments() {
        assert_eq!(ResourceContainer::account("abc").url_fragment(), "accounts/abc");
        assert_eq!(ResourceContainer::zone("def").url_fragment(), "zones/def");
        assert_eq!(ResourceContainer::user().url_fragment(), "user");
        assert_eq!(ResourceContainer::user().identifier(), "");
    }

    #[test]
    fn test_require_rejects_foreign_level() {
        let error = ResourceContainer::zone("abc")
            .require("LoadBalancerPool::create", &[ResourceLevel::Account, ResourceLevel::User])
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidResourceContainer);
        assert!(error.to_string().contains("zones"));
    }

    #[test]
    fn test_require_rejects_empty_identifier() {
        let error = ResourceContainer::account("")
            .require("IpPrefix::list", &ALL)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingIdentifier);
        assert!(error.to_string().contains("account ID"));

        let error = ResourceContainer::zone(" ").require("DnsRecord::list", &ALL).unwrap_err();
        assert!(error.to_string().contains("zone ID"));
    }

    #[test]
    fn test_user_level_needs_no_identifier() {
        assert!(ResourceContainer::user().require("UserDetails::get", &ALL).is_ok());
    }

    #[test]
    fn test_parse_round_trips_display() {
        for container in [
            ResourceContainer::account("abc"),
            ResourceContainer::zone("def"),
            ResourceContainer::user(),
        ] {
            let parsed: ResourceContainer = container.to_string().parse().unwrap();
            assert_eq!(parsed, container);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_levels() {
        assert!("organizations/abc".parse::<ResourceContainer>().is_err());
        assert!("zones/".parse::<ResourceContainer>().is_err());
        assert!("zones/a/b".parse::<ResourceContainer>().is_err());
    }

    #[test]
    fn test_container_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceContainer>();
    }
}
