//! LINT_CV_003: Comparison with NULL.
//!
//! `x = NULL` and `x <> NULL` are never true; `IS [NOT] NULL` is meant.

use crate::ast::{BinaryOperator, Statement};
use crate::linter::collect::binary_exprs;
use crate::linter::helpers::is_null_expr;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_003,
    name: "convention.is_null",
    group: RuleGroup::Convention,
    description: "Compare with NULL using IS NULL or IS NOT NULL.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct IsNullComparison;

impl LintRule for IsNullComparison {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        binary_exprs(Node::Statement(statement))
            .into_iter()
            .filter_map(|binary| {
                let replacement = match binary.op {
                    BinaryOperator::Eq => "IS NULL",
                    BinaryOperator::NotEq => "IS NOT NULL",
                    _ => return None,
                };
                if !is_null_expr(&binary.left) && !is_null_expr(&binary.right) {
                    return None;
                }
                Some(
                    ctx.diagnostic(format!(
                        "Comparison with NULL is never true; use {replacement}."
                    ))
                    .with_span(binary.span)
                    .fixable(),
                )
            })
            .collect()
    }
}
