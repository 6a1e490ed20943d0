//! Phase entrypoint rulesets.
//!
//! Every phase of the request pipeline (e.g. `http_request_firewall_custom`)
//! has one entrypoint ruleset per account and per zone. Entrypoints are read
//! and updated by phase name rather than by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Context, Error, HttpMethod, RestClient};
use crate::rest::{
    build_path, resolve_path, ResourceContainer, ResourceLevel, ResourceOperation, ResourcePath,
};

const SCOPES: &[ResourceLevel] = &[ResourceLevel::Account, ResourceLevel::Zone];

const ENTRYPOINT_PATHS: &[ResourcePath] = &[
    ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Get,
        SCOPES,
        "rulesets/phases/{phase}/entrypoint",
    ),
    ResourcePath::new(
        HttpMethod::Patch,
        ResourceOperation::Update,
        SCOPES,
        "rulesets/phases/{phase}/entrypoint",
    ),
];

/// A ruleset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Ruleset {
    /// Ruleset identifier.
    #[serde(default)]
    pub id: String,
    /// Ruleset name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind (`root`, `zone`, `managed`, `custom`).
    #[serde(default)]
    pub kind: String,
    /// Version string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Phase the ruleset runs in.
    #[serde(default)]
    pub phase: String,
    /// Ordered rules.
    #[serde(default)]
    pub rules: Vec<RulesetRule>,
    /// When the ruleset last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// One rule of a ruleset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RulesetRule {
    /// Rule identifier; omit when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Action (`block`, `skip`, `execute`, ...).
    pub action: String,
    /// Filter expression.
    pub expression: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the rule runs; `Some(false)` disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Action-specific parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_parameters: Option<serde_json::Value>,
    /// Logging override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<serde_json::Value>,
    /// Rule reference, stable across updates.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Body for updating a phase entrypoint.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateEntrypointParams {
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The complete, ordered rule list.
    pub rules: Vec<RulesetRule>,
}

impl Ruleset {
    const NAME: &'static str = "Ruleset";

    /// Fetches the entrypoint ruleset of `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] for an empty phase, container
    /// errors, or any request error.
    pub async fn get_entrypoint(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        phase: &str,
    ) -> Result<Self, Error> {
        let url = entrypoint_url(container, ResourceOperation::Get, phase)?;
        Ok(client.send::<Self>(ctx, HttpMethod::Get, &url, None).await?.result)
    }

    /// Replaces the rules of the entrypoint ruleset of `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingIdentifier`] for an empty phase, container
    /// errors, or any request error.
    pub async fn update_entrypoint(
        client: &RestClient,
        ctx: &Context,
        container: &ResourceContainer,
        phase: &str,
        params: &UpdateEntrypointParams,
    ) -> Result<Self, Error> {
        let url = entrypoint_url(container, ResourceOperation::Update, phase)?;
        Ok(client.patch::<_, Self>(ctx, &url, params).await?.result)
    }
}

fn entrypoint_url(
    container: &ResourceContainer,
    operation: ResourceOperation,
    phase: &str,
) -> Result<String, Error> {
    let path = resolve_path(Ruleset::NAME, ENTRYPOINT_PATHS, operation, container)?;
    if phase.trim().is_empty() {
        return Err(Error::MissingIdentifier {
            operation: format!("{}::{}_entrypoint", Ruleset::NAME, operation.as_str()),
            field: "phase",
        });
    }
    Ok(build_path(container, path.template, &[("phase", phase)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_entrypoint_url() {
        assert_eq!(
            entrypoint_url(
                &ResourceContainer::zone("z1"),
                ResourceOperation::Update,
                "http_request_firewall_custom"
            )
            .unwrap(),
            "zones/z1/rulesets/phases/http_request_firewall_custom/entrypoint"
        );
    }

    #[test]
    fn test_entrypoint_requires_phase_and_scope() {
        let error = entrypoint_url(&ResourceContainer::account("a"), ResourceOperation::Get, "")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingIdentifier);
        assert!(error.to_string().contains("phase"));

        let error = entrypoint_url(&ResourceContainer::user(), ResourceOperation::Get, "ddos_l7")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidResourceContainer);
    }

    #[test]
    fn test_disabled_rule_keeps_enabled_false() {
        let rule = RulesetRule {
            action: "block".to_string(),
            expression: "ip.src eq 192.0.2.1".to_string(),
            enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"action": "block", "expression": "ip.src eq 192.0.2.1", "enabled": false})
        );
    }
}
