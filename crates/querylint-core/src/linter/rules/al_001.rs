//! LINT_AL_001: Expression without alias.
//!
//! Computed select-list expressions get a generated, dialect-dependent
//! column name unless they are aliased explicitly.

use crate::ast::{Expr, ExprKind, SelectItem, Statement, UnaryOperator};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_001,
    name: "aliasing.expression",
    group: RuleGroup::Aliasing,
    description: "Computed select expressions should have an explicit alias.",
    default_severity: Severity::Info,
    config_keys: &["allow_scalar"],
};

pub struct ExpressionAlias;

impl LintRule for ExpressionAlias {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let allow_scalar = ctx.option_bool("allow_scalar").unwrap_or(true);
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            for (index, item) in core.columns.iter().enumerate() {
                let SelectItem::Expr { expr, alias: None } = item else {
                    continue;
                };
                if needs_alias(expr, allow_scalar) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Select expression {} has no alias; name computed columns explicitly.",
                            index + 1
                        ))
                        .with_span(expr.span),
                    );
                }
            }
        }
        diagnostics
    }
}

fn needs_alias(expr: &Expr, allow_scalar: bool) -> bool {
    match &expr.unnested().kind {
        ExprKind::Column(_) | ExprKind::Star { .. } => false,
        ExprKind::Literal(_) => !allow_scalar,
        ExprKind::Unary {
            op: UnaryOperator::Minus | UnaryOperator::Plus,
            expr: inner,
        } if inner.as_literal().is_some() => !allow_scalar,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;
    use crate::types::Dialect;
    use serde_json::{json, Map, Value};

    fn check_sql(sql: &str) -> Vec<Diagnostic> {
        check_with(sql, Map::new())
    }

    fn check_with(sql: &str, options: Map<String, Value>) -> Vec<Diagnostic> {
        let ctx = LintContext::new(&META, Dialect::Generic).with_options(Some(&options));
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| ExpressionAlias.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_unaliased_function_detected() {
        let diagnostics = check_sql("SELECT a, UPPER(b) FROM t");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "LINT_AL_001");
        assert!(diagnostics[0].message.contains("expression 2"));
    }

    #[test]
    fn test_aliased_expression_ok() {
        assert!(check_sql("SELECT a + 1 AS next_a, COUNT(*) AS n FROM t").is_empty());
    }

    #[test]
    fn test_plain_columns_and_stars_ok() {
        assert!(check_sql("SELECT a, t.b, t.*, * FROM t").is_empty());
    }

    #[test]
    fn test_scalar_literals_allowed_by_default() {
        assert!(check_sql("SELECT 1, 'x', -2 FROM t").is_empty());
    }

    #[test]
    fn test_scalar_literals_flagged_when_disallowed() {
        let options = json!({"allow_scalar": false}).as_object().unwrap().clone();
        assert_eq!(check_with("SELECT 1, 'x', -2 FROM t", options).len(), 3);
    }

    #[test]
    fn test_subquery_cores_are_checked() {
        let diagnostics = check_sql("SELECT * FROM (SELECT a * 2 FROM t) AS sub");
        assert_eq!(diagnostics.len(), 1);
    }
}
