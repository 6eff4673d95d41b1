//! LINT_AL_003: Unique column alias.

use std::collections::HashSet;

use crate::ast::Statement;
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_003,
    name: "aliasing.unique.column",
    group: RuleGroup::Aliasing,
    description: "Column aliases should be unique within a select list.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct UniqueColumnAlias;

impl LintRule for UniqueColumnAlias {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            let mut seen = HashSet::new();
            for alias in core.columns.iter().filter_map(|item| item.alias()) {
                if !seen.insert(alias.normalized()) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Column alias '{}' is used more than once in the select list.",
                            alias.value
                        ))
                        .with_span(alias.span),
                    );
                }
            }
        }
        diagnostics
    }
}
