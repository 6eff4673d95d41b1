//! LINT_AM_007: Ambiguous JOIN condition.
//!
//! A join that is neither CROSS nor NATURAL but has no ON or USING clause
//! behaves like a cross join on most engines.

use crate::ast::{Join, JoinKind, Statement};
use crate::linter::collect::joins;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_007,
    name: "ambiguous.join_condition",
    group: RuleGroup::Ambiguous,
    description: "Joins other than CROSS and NATURAL should have an ON or USING clause.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct MissingJoinCondition;

impl LintRule for MissingJoinCondition {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        joins(Node::Statement(statement))
            .into_iter()
            .filter(|join| lacks_condition(join))
            .map(|join| {
                ctx.diagnostic(format!(
                    "{} without ON or USING; add a join condition or write CROSS JOIN.",
                    join.kind.keyword()
                ))
                .with_span(join.span)
            })
            .collect()
    }
}

fn lacks_condition(join: &Join) -> bool {
    let needs_condition = match join.kind {
        JoinKind::Plain
        | JoinKind::Inner
        | JoinKind::Left
        | JoinKind::Right
        | JoinKind::Full
        | JoinKind::Semi
        | JoinKind::Anti => true,
        JoinKind::Cross | JoinKind::Apply | JoinKind::Implicit => false,
    };
    needs_condition && !join.natural && join.condition.is_none() && join.using.is_empty()
}
