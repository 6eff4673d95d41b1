//! LINT_CV_004: Prefer LEFT JOIN.
//!
//! A RIGHT JOIN can always be rewritten as a LEFT JOIN with the tables
//! swapped, which keeps the preserved table first.

use crate::ast::{JoinKind, Statement};
use crate::linter::collect::joins;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_004,
    name: "convention.left_join",
    group: RuleGroup::Convention,
    description: "Use LEFT JOIN instead of RIGHT JOIN.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct PreferLeftJoin;

impl LintRule for PreferLeftJoin {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        joins(Node::Statement(statement))
            .into_iter()
            .filter(|join| join.kind == JoinKind::Right)
            .map(|join| {
                ctx.diagnostic("RIGHT JOIN; rewrite as LEFT JOIN with the tables swapped.")
                    .with_span(join.span)
            })
            .collect()
    }
}
