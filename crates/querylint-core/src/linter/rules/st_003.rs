//! LINT_ST_003: Deeply nested CASE expressions.
//!
//! Reported once per outermost CASE whose nesting exceeds `max_depth`
//! (default 3).

use std::ptr;

use crate::ast::{Expr, ExprKind, Statement};
use crate::linter::collect::collect;
use crate::linter::helpers::case_depth;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_003,
    name: "structure.nested_case",
    group: RuleGroup::Structure,
    description: "CASE expressions should not be nested too deeply.",
    default_severity: Severity::Warning,
    config_keys: &["max_depth"],
};

const DEFAULT_MAX_DEPTH: usize = 3;

pub struct NestedCase;

impl LintRule for NestedCase {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let max_depth = ctx.option_usize("max_depth").unwrap_or(DEFAULT_MAX_DEPTH);

        let cases: Vec<&Expr> = collect::<&Expr>(Node::Statement(statement))
            .into_iter()
            .filter(|expr| matches!(expr.kind, ExprKind::Case(_)))
            .collect();
        let inner: Vec<&Expr> = cases.iter().flat_map(|expr| directly_nested(*expr)).collect();

        cases
            .into_iter()
            .filter(|expr| !inner.iter().any(|nested| ptr::eq(*nested, *expr)))
            .filter_map(|expr| {
                let depth = case_depth(expr);
                (depth > max_depth).then(|| {
                    ctx.diagnostic(format!(
                        "CASE expression is nested {depth} levels deep (maximum {max_depth})."
                    ))
                    .with_span(expr.span)
                })
            })
            .collect()
    }
}

/// CASE expressions appearing directly (modulo parentheses) as a part of
/// the CASE `expr`.
fn directly_nested(expr: &Expr) -> Vec<&Expr> {
    let ExprKind::Case(case) = &expr.kind else {
        return Vec::new();
    };
    case.operand
        .iter()
        .map(|operand| &**operand)
        .chain(
            case.branches
                .iter()
                .flat_map(|branch| [&branch.condition, &branch.result]),
        )
        .chain(case.else_result.iter().map(|result| &**result))
        .map(Expr::unnested)
        .filter(|part| matches!(part.kind, ExprKind::Case(_)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;
    use crate::types::Dialect;
    use serde_json::{json, Map, Value};

    fn check_with(sql: &str, options: Value) -> Vec<Diagnostic> {
        let options: Map<String, Value> = options.as_object().cloned().unwrap_or_default();
        let ctx = LintContext::new(&META, Dialect::Generic).with_options(Some(&options));
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| NestedCase.check(statement, &ctx))
            .collect()
    }

    const FOUR_DEEP: &str = "SELECT CASE WHEN a THEN CASE WHEN b THEN CASE WHEN c THEN \
         CASE WHEN d THEN 1 END END END END FROM t";

    #[test]
    fn test_deep_nesting_detected_once() {
        let diagnostics = check_with(FOUR_DEEP, json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("nested 4 levels"));
    }

    #[test]
    fn test_nesting_within_limit_ok() {
        let sql = "SELECT CASE WHEN a THEN CASE WHEN b THEN 1 END END FROM t";
        assert!(check_with(sql, json!({})).is_empty());
    }

    #[test]
    fn test_max_depth_option() {
        let sql = "SELECT CASE WHEN a THEN CASE WHEN b THEN 1 END END FROM t";
        assert_eq!(check_with(sql, json!({"max_depth": 1})).len(), 1);
        assert!(check_with(FOUR_DEEP, json!({"max_depth": 4})).is_empty());
    }

    #[test]
    fn test_parenthesized_nesting_counts() {
        let sql = "SELECT CASE WHEN a THEN (CASE WHEN b THEN 1 END) END FROM t";
        assert_eq!(check_with(sql, json!({"max_depth": 1})).len(), 1);
    }
}
