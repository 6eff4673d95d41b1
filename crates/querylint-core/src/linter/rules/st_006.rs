//! LINT_ST_006: Structure column order.
//!
//! Select lists read best as wildcards and plain columns first, computed
//! expressions last. Set-operation branches are skipped because reordering
//! their columns changes the result.

use std::ptr;

use crate::ast::{Body, Core, ExprKind, SelectItem, Statement};
use crate::linter::collect::{collect, cores, set_operation_cores};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_006,
    name: "structure.column_order",
    group: RuleGroup::Structure,
    description: "Select wildcards and simple columns before complex expressions.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct ColumnOrder;

impl LintRule for ColumnOrder {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let root = Node::Statement(statement);
        let branches: Vec<&Core> = collect::<&Body>(root)
            .into_iter()
            .filter(|body| matches!(body, Body::SetOperation(_)))
            .flat_map(set_operation_cores)
            .collect();

        cores(root)
            .into_iter()
            .filter(|core| !branches.iter().any(|branch| ptr::eq(*branch, *core)))
            .filter_map(|core| {
                let mut seen_complex = false;
                let misplaced = core.columns.iter().find(|item| {
                    if is_simple(item) {
                        seen_complex
                    } else {
                        seen_complex = true;
                        false
                    }
                })?;
                Some(
                    ctx.diagnostic(
                        "Select wildcards and simple columns before complex expressions.",
                    )
                    .with_span(misplaced.span()),
                )
            })
            .collect()
    }
}

fn is_simple(item: &SelectItem) -> bool {
    match item {
        SelectItem::Wildcard { .. } | SelectItem::QualifiedWildcard { .. } => true,
        SelectItem::Expr { expr, .. } => matches!(expr.unnested().kind, ExprKind::Column(_)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;
    use crate::types::Dialect;

    fn check_sql(sql: &str) -> Vec<Diagnostic> {
        let ctx = LintContext::new(&META, Dialect::Generic);
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| ColumnOrder.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_column_after_expression_detected() {
        let diagnostics = check_sql("SELECT a + 1 AS b, c FROM t");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_wildcard_after_expression_detected() {
        assert_eq!(check_sql("SELECT COUNT(*) AS n, t.* FROM t").len(), 1);
    }

    #[test]
    fn test_reported_once_per_select() {
        assert_eq!(check_sql("SELECT a + 1 AS b, c, d FROM t").len(), 1);
    }

    #[test]
    fn test_good_order_ok() {
        assert!(check_sql("SELECT *, a, b, a + b AS total FROM t").is_empty());
    }

    #[test]
    fn test_set_operation_branches_skipped() {
        assert!(check_sql("SELECT a + 1, b FROM t UNION ALL SELECT c + 1, d FROM u").is_empty());
    }
}
