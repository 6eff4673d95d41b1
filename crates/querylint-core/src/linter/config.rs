//! Configuration for the SQL linter.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::registry::RuleRegistry;
use super::rule::{RuleGroup, RuleMeta};
use crate::error::ConfigError;
use crate::types::Severity;

/// Configuration for the SQL linter.
///
/// Rules are referenced by code (`LINT_ST_001`) or dotted name
/// (`structure.unused_cte`), case-insensitively. By default every
/// registered rule is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Master toggle for linting (default: true).
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Rules to disable. Wins over every other setting.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_rules: Vec<String>,

    /// Rules to force on even when their group is disabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_rules: Vec<String>,

    /// Groups whose rules are off unless individually enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_groups: Vec<RuleGroup>,

    /// Per-rule option objects, e.g. `{"structure.nested_case": {"max_depth": 2}}`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rule_configs: BTreeMap<String, Value>,

    /// Per-rule severity overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rule_severities: BTreeMap<String, Severity>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disabled_rules: Vec::new(),
            enabled_rules: Vec::new(),
            disabled_groups: Vec::new(),
            rule_configs: BTreeMap::new(),
            rule_severities: BTreeMap::new(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn refers_to(reference: &str, meta: &RuleMeta) -> bool {
    reference.eq_ignore_ascii_case(meta.code) || reference.eq_ignore_ascii_case(meta.name)
}

impl LintConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if the rule should run.
    ///
    /// Order of precedence: master toggle, explicit disable, explicit enable,
    /// group disable.
    pub fn is_rule_enabled(&self, meta: &RuleMeta) -> bool {
        if !self.enabled {
            return false;
        }
        if self.disabled_rules.iter().any(|r| refers_to(r, meta)) {
            return false;
        }
        if self.enabled_rules.iter().any(|r| refers_to(r, meta)) {
            return true;
        }
        !self.disabled_groups.contains(&meta.group)
    }

    /// The option object configured for a rule, if any.
    pub fn rule_options(&self, meta: &RuleMeta) -> Option<&Map<String, Value>> {
        self.rule_configs
            .iter()
            .find(|(reference, _)| refers_to(reference, meta))
            .and_then(|(_, options)| options.as_object())
    }

    /// Configured severity for a rule, falling back to its default.
    pub fn severity_for(&self, meta: &RuleMeta) -> Severity {
        self.rule_severities
            .iter()
            .find(|(reference, _)| refers_to(reference, meta))
            .map_or(meta.default_severity, |(_, severity)| *severity)
    }

    /// Checks that every rule the configuration names exists in `registry`.
    ///
    /// Analysis never calls this; unknown references are simply inert there.
    pub fn validate(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        let references = self
            .disabled_rules
            .iter()
            .chain(&self.enabled_rules)
            .chain(self.rule_configs.keys())
            .chain(self.rule_severities.keys());

        for reference in references {
            if registry.get(reference).is_none() {
                return Err(ConfigError::UnknownRule(reference.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static META: RuleMeta = RuleMeta {
        code: "LINT_ST_001",
        name: "structure.unused_cte",
        group: RuleGroup::Structure,
        description: "Unused CTE.",
        default_severity: Severity::Warning,
        config_keys: &[],
    };

    #[test]
    fn test_default_config_enables_all() {
        let config = LintConfig::default();
        assert!(config.enabled);
        assert!(config.is_rule_enabled(&META));
    }

    #[test]
    fn test_disabled_rule_by_name() {
        let config = LintConfig {
            disabled_rules: vec!["Structure.Unused_CTE".to_string()],
            ..Default::default()
        };
        assert!(!config.is_rule_enabled(&META));
    }

    #[test]
    fn test_master_toggle_off() {
        let config = LintConfig {
            enabled: false,
            enabled_rules: vec!["LINT_ST_001".to_string()],
            ..Default::default()
        };
        assert!(!config.is_rule_enabled(&META));
    }

    #[test]
    fn test_explicit_enable_beats_group_disable() {
        let mut config = LintConfig {
            disabled_groups: vec![RuleGroup::Structure],
            ..Default::default()
        };
        assert!(!config.is_rule_enabled(&META));

        config.enabled_rules.push("lint_st_001".to_string());
        assert!(config.is_rule_enabled(&META));
    }

    #[test]
    fn test_explicit_disable_beats_explicit_enable() {
        let config = LintConfig {
            enabled_rules: vec!["LINT_ST_001".to_string()],
            disabled_rules: vec!["LINT_ST_001".to_string()],
            ..Default::default()
        };
        assert!(!config.is_rule_enabled(&META));
    }

    #[test]
    fn test_deserialization_defaults() {
        let config = LintConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LintConfig::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let config = LintConfig::from_json_str(
            r#"{
                "disabledGroups": ["aliasing"],
                "ruleConfigs": {"structure.unused_cte": {"x": 1}},
                "ruleSeverities": {"LINT_ST_001": "error"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.disabled_groups, vec![RuleGroup::Aliasing]);
        assert!(config.rule_options(&META).is_some());
        assert_eq!(config.severity_for(&META), Severity::Error);
    }

    #[test]
    fn test_non_object_rule_config_is_ignored() {
        let config = LintConfig::from_json_str(r#"{"ruleConfigs": {"LINT_ST_001": 3}}"#).unwrap();
        assert!(config.rule_options(&META).is_none());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            LintConfig::from_json_str("{\"enabled\": 1}"),
            Err(ConfigError::Json(_))
        ));
    }
}
