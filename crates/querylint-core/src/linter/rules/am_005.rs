//! LINT_AM_005: Ambiguous JOIN style.
//!
//! A bare `JOIN` is an inner join; writing `INNER JOIN` says so.

use crate::ast::{JoinKind, Statement};
use crate::linter::collect::joins;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_005,
    name: "ambiguous.join",
    group: RuleGroup::Ambiguous,
    description: "Joins should state their type explicitly.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct BareJoin;

impl LintRule for BareJoin {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        joins(Node::Statement(statement))
            .into_iter()
            .filter(|join| join.kind == JoinKind::Plain)
            .map(|join| {
                ctx.diagnostic("Bare JOIN; use INNER JOIN to make the join type explicit.")
                    .with_span(join.span)
                    .fixable()
            })
            .collect()
    }
}
