//! Rule catalog.
//!
//! A [`RuleRegistry`] is assembled once and read-only afterwards. The
//! process-wide instance behind [`global`] is built on first use from
//! [`super::rules::register_builtin_rules`], the one place listing every
//! built-in rule.

use std::collections::HashMap;
use std::sync::OnceLock;

use indexmap::IndexMap;
#[cfg(feature = "tracing")]
use tracing::debug;

use super::rule::{LintRule, RuleGroup, RuleMeta};
use super::rules;
use crate::error::RegistryError;

/// Ordered set of rules keyed by code, with name and group indexes.
#[derive(Default)]
pub struct RuleRegistry {
    rules: IndexMap<&'static str, Box<dyn LintRule>>,
    /// Lowercase dotted name -> code
    names: HashMap<String, &'static str>,
    groups: IndexMap<RuleGroup, Vec<&'static str>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_builtin_rules() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        rules::register_builtin_rules(&mut registry)?;
        Ok(registry)
    }

    /// Adds a rule. Fails if its code or dotted name is already taken.
    pub fn register(&mut self, rule: Box<dyn LintRule>) -> Result<(), RegistryError> {
        let meta = rule.meta();
        if self.rules.contains_key(meta.code) {
            return Err(RegistryError::DuplicateRule {
                code: meta.code.to_string(),
            });
        }
        let name = meta.name.to_ascii_lowercase();
        if let Some(existing) = self.names.get(&name) {
            return Err(RegistryError::DuplicateName {
                name: meta.name.to_string(),
                existing: (*existing).to_string(),
            });
        }

        self.names.insert(name, meta.code);
        self.groups.entry(meta.group).or_default().push(meta.code);
        self.rules.insert(meta.code, rule);
        Ok(())
    }

    /// Looks a rule up by code or dotted name, case-insensitively.
    pub fn get(&self, reference: &str) -> Option<&(dyn LintRule + 'static)> {
        let code = self
            .rules
            .keys()
            .find(|code| code.eq_ignore_ascii_case(reference))
            .copied()
            .or_else(|| {
                self.names
                    .get(&reference.to_ascii_lowercase())
                    .copied()
            })?;
        self.rules.get(code).map(Box::as_ref)
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn LintRule + 'static)> {
        self.rules.values().map(Box::as_ref)
    }

    pub fn metas(&self) -> impl Iterator<Item = &'static RuleMeta> + '_ {
        self.iter().map(|rule| rule.meta())
    }

    /// Rules of one group, in registration order.
    pub fn group(&self, group: RuleGroup) -> impl Iterator<Item = &(dyn LintRule + 'static)> {
        self.groups
            .get(&group)
            .into_iter()
            .flatten()
            .filter_map(|code| self.rules.get(code).map(Box::as_ref))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The process-wide registry of built-in rules.
///
/// Initialized on first call; every later call returns the same instance.
///
/// # Panics
///
/// Panics if the built-in catalog registers a duplicate rule, which is a
/// defect in the catalog itself.
pub fn global() -> &'static RuleRegistry {
    static REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| match RuleRegistry::with_builtin_rules() {
        Ok(registry) => {
            #[cfg(feature = "tracing")]
            debug!(rules = registry.len(), "initialized lint rule registry");
            registry
        }
        Err(err) => panic!("built-in lint rule catalog is inconsistent: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::linter::rule::LintContext;
    use crate::types::{Diagnostic, Severity};

    struct Fake(&'static RuleMeta);

    impl LintRule for Fake {
        fn meta(&self) -> &'static RuleMeta {
            self.0
        }

        fn check(&self, _statement: &Statement, _ctx: &LintContext) -> Vec<Diagnostic> {
            Vec::new()
        }
    }

    const BASE: RuleMeta = RuleMeta {
        code: "LINT_XX_001",
        name: "test.first",
        group: RuleGroup::Structure,
        description: "",
        default_severity: Severity::Info,
        config_keys: &[],
    };

    static FIRST: RuleMeta = BASE;

    static SAME_CODE: RuleMeta = RuleMeta {
        name: "test.other",
        ..BASE
    };

    static SAME_NAME: RuleMeta = RuleMeta {
        code: "LINT_XX_002",
        name: "TEST.FIRST",
        ..BASE
    };

    #[test]
    fn duplicate_code_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Fake(&FIRST))).unwrap();
        let err = registry.register(Box::new(Fake(&SAME_CODE))).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRule {
                code: "LINT_XX_001".to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Fake(&FIRST))).unwrap();
        assert!(matches!(
            registry.register(Box::new(Fake(&SAME_NAME))),
            Err(RegistryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn lookup_by_code_or_name() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(Fake(&FIRST))).unwrap();
        assert!(registry.get("lint_xx_001").is_some());
        assert!(registry.get("Test.First").is_some());
        assert!(registry.get("test.missing").is_none());
    }

    #[test]
    fn global_registry_is_a_singleton() {
        assert!(std::ptr::eq(global(), global()));
        assert!(!global().is_empty());
    }

    #[test]
    fn builtin_catalog_groups_cover_every_rule() {
        let registry = global();
        let grouped: usize = RuleGroup::ALL
            .iter()
            .map(|group| registry.group(*group).count())
            .sum();
        assert_eq!(grouped, registry.len());
    }
}
