//! Lint rule trait, rule metadata and the per-invocation context.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ast::Statement;
use crate::types::{Diagnostic, Dialect, DialectFeature, Severity};

/// Rule category, used for bulk enable/disable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RuleGroup {
    Aliasing,
    Ambiguous,
    Convention,
    Structure,
    References,
}

impl RuleGroup {
    pub const ALL: [RuleGroup; 5] = [
        Self::Aliasing,
        Self::Ambiguous,
        Self::Convention,
        Self::Structure,
        Self::References,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aliasing => "aliasing",
            Self::Ambiguous => "ambiguous",
            Self::Convention => "convention",
            Self::Structure => "structure",
            Self::References => "references",
        }
    }

    /// Two-letter code segment, e.g. `AL` in `LINT_AL_001`.
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Aliasing => "AL",
            Self::Ambiguous => "AM",
            Self::Convention => "CV",
            Self::Structure => "ST",
            Self::References => "RF",
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMeta {
    /// Machine-readable rule code (e.g. `LINT_ST_001`).
    pub code: &'static str,
    /// Dotted name (e.g. `structure.unused_cte`).
    pub name: &'static str,
    pub group: RuleGroup,
    pub description: &'static str,
    pub default_severity: Severity,
    /// Option keys the rule reads from its configuration bag.
    pub config_keys: &'static [&'static str],
}

/// A single lint rule that checks a statement for one kind of problem.
///
/// Rules are pure: they read the statement and the context and return
/// diagnostics. A statement without the shape a rule expects yields no
/// diagnostics, never an error.
pub trait LintRule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    /// Check a single statement and return any findings.
    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic>;
}

/// Context provided to a rule for one invocation.
#[derive(Debug, Clone)]
pub struct LintContext<'a> {
    meta: &'static RuleMeta,
    /// Dialect of the statement being checked.
    pub dialect: Dialect,
    /// Effective severity after configuration overrides.
    pub severity: Severity,
    options: Option<&'a Map<String, Value>>,
}

impl<'a> LintContext<'a> {
    pub fn new(meta: &'static RuleMeta, dialect: Dialect) -> Self {
        Self {
            meta,
            dialect,
            severity: meta.default_severity,
            options: None,
        }
    }

    pub fn with_options(mut self, options: Option<&'a Map<String, Value>>) -> Self {
        self.options = options;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn meta(&self) -> &'static RuleMeta {
        self.meta
    }

    pub fn supports(&self, feature: DialectFeature) -> bool {
        self.dialect.supports(feature)
    }

    /// A diagnostic stamped with the rule's code and effective severity.
    pub fn diagnostic(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(self.meta.code, self.severity, message)
    }

    /// Raw option value. Keys the rule does not declare are never returned.
    pub fn option(&self, key: &str) -> Option<&'a Value> {
        if !self.meta.config_keys.iter().any(|declared| *declared == key) {
            return None;
        }
        self.options?.get(key)
    }

    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.option(key)?.as_bool()
    }

    pub fn option_usize(&self, key: &str) -> Option<usize> {
        self.option(key)?
            .as_u64()
            .and_then(|value| usize::try_from(value).ok())
    }

    pub fn option_str(&self, key: &str) -> Option<&'a str> {
        self.option(key)?.as_str()
    }
}
