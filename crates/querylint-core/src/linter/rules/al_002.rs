//! LINT_AL_002: Unique table alias.
//!
//! Every table in one FROM clause must be addressable by a distinct name.
//! A repeated alias (or a repeated bare table name) makes qualified column
//! references ambiguous.

use std::collections::HashSet;

use crate::ast::Statement;
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_002,
    name: "aliasing.unique.table",
    group: RuleGroup::Aliasing,
    description: "Table aliases should be unique within a FROM clause.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct UniqueTableAlias;

impl LintRule for UniqueTableAlias {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            let mut seen = HashSet::new();
            for table in core.table_refs() {
                let Some(name) = table.reference_name() else {
                    continue;
                };
                if !seen.insert(name.normalized()) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Table alias '{}' is used more than once in the same FROM clause.",
                            name.value
                        ))
                        .with_span(name.span),
                    );
                }
            }
        }
        diagnostics
    }
}
