//! LINT_ST_007: Structure distinct.
//!
//! `SELECT DISTINCT(a)` looks like a function call but DISTINCT applies to
//! the whole row, not to the parenthesized column.

use crate::ast::{ExprKind, Statement};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_007,
    name: "structure.distinct",
    group: RuleGroup::Structure,
    description: "DISTINCT used with parentheses.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct DistinctParentheses;

impl LintRule for DistinctParentheses {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        cores(Node::Statement(statement))
            .into_iter()
            .filter(|core| core.distinct)
            .filter_map(|core| {
                let first = core.columns.first()?.expr()?;
                matches!(first.kind, ExprKind::Nested(_)).then(|| {
                    ctx.diagnostic(
                        "DISTINCT is not a function; remove the parentheses around the first column.",
                    )
                    .with_span(first.span)
                    .fixable()
                })
            })
            .collect()
    }
}
