//! LINT_AM_002: Bare UNION.
//!
//! `UNION` without `ALL` or `DISTINCT` silently deduplicates; spelling the
//! quantifier out makes the intent explicit.

use crate::ast::{SetOperator, SetQuantifier, Statement};
use crate::linter::collect::set_operations;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_002,
    name: "ambiguous.union",
    group: RuleGroup::Ambiguous,
    description: "UNION should specify ALL or DISTINCT.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct BareUnion;

impl LintRule for BareUnion {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        set_operations(Node::Statement(statement))
            .into_iter()
            .filter(|operation| {
                operation.op == SetOperator::Union
                    && operation.quantifier == SetQuantifier::Implicit
            })
            .map(|operation| {
                ctx.diagnostic(
                    "UNION without ALL or DISTINCT; use UNION ALL to keep duplicates or UNION DISTINCT to make deduplication explicit.",
                )
                .with_span(operation.span)
            })
            .collect()
    }
}
