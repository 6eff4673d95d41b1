//! LINT_ST_009: Constant boolean predicate.
//!
//! Detect constant conditions in WHERE clauses: an equality between two
//! identical literals (`1 = 1`, `'a' = 'a'`), or a bare boolean or `1`/`0`
//! literal used as a condition. AND, OR and parentheses are searched
//! recursively; arithmetic, casts and function calls are not folded.

use crate::ast::{BinaryOperator, Expr, ExprKind, Literal, LiteralKind, Statement};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_009,
    name: "structure.constant_expression",
    group: RuleGroup::Structure,
    description: "Avoid constant boolean expressions in predicates.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct ConstantExpression;

impl LintRule for ConstantExpression {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            let Some(predicate) = &core.where_clause else {
                continue;
            };
            let mut constants = Vec::new();
            find_constants(predicate, &mut constants);

            diagnostics.extend(constants.into_iter().map(|(expr, message)| {
                ctx.diagnostic(message).with_span(expr.span)
            }));
        }
        diagnostics
    }
}

fn find_constants<'a>(expr: &'a Expr, found: &mut Vec<(&'a Expr, String)>) {
    match &expr.kind {
        ExprKind::Nested(inner) => find_constants(inner, found),
        ExprKind::Binary(binary) if matches!(binary.op, BinaryOperator::And | BinaryOperator::Or) => {
            find_constants(&binary.left, found);
            find_constants(&binary.right, found);
        }
        ExprKind::Binary(binary) if binary.op == BinaryOperator::Eq => {
            if let (Some(left), Some(right)) = (binary.left.as_literal(), binary.right.as_literal())
            {
                if left.kind != LiteralKind::Null && left == right {
                    found.push((
                        expr,
                        format!(
                            "Constant condition in WHERE clause: {0} = {0} is always true.",
                            render(left)
                        ),
                    ));
                }
            }
        }
        ExprKind::Literal(literal) if is_constant_condition(literal) => {
            found.push((
                expr,
                format!(
                    "Constant condition in WHERE clause: {} used as a predicate.",
                    render(literal)
                ),
            ));
        }
        _ => {}
    }
}

fn is_constant_condition(literal: &Literal) -> bool {
    match literal.kind {
        LiteralKind::Boolean => true,
        LiteralKind::Number => matches!(literal.value.as_str(), "1" | "0"),
        LiteralKind::String | LiteralKind::Null | LiteralKind::Other => false,
    }
}

fn render(literal: &Literal) -> String {
    match literal.kind {
        LiteralKind::String => format!("'{}'", literal.value),
        _ => literal.value.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;
    use crate::types::Dialect;
    use rstest::rstest;

    fn check_sql(sql: &str) -> Vec<Diagnostic> {
        let ctx = LintContext::new(&META, Dialect::Generic);
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| ConstantExpression.check(statement, &ctx))
            .collect()
    }

    #[rstest]
    #[case("SELECT * FROM t WHERE 1=1", 1)]
    #[case("SELECT * FROM t WHERE 1=1 AND x>0", 1)]
    #[case("SELECT * FROM t WHERE x > 0 OR ((1 = 1))", 1)]
    #[case("SELECT * FROM t WHERE 'a' = 'a'", 1)]
    #[case("SELECT * FROM t WHERE TRUE", 1)]
    #[case("SELECT * FROM t WHERE 1", 1)]
    #[case("SELECT * FROM t WHERE x = 1 AND 0", 1)]
    #[case("SELECT * FROM t WHERE x=1", 0)]
    #[case("SELECT * FROM t WHERE 1 = 2", 0)]
    #[case("SELECT * FROM t WHERE 1 = '1'", 0)]
    #[case("SELECT * FROM t WHERE 1 + 1 = 2", 0)]
    #[case("SELECT * FROM t WHERE 2", 0)]
    fn test_constant_predicates(#[case] sql: &str, #[case] expected: usize) {
        assert_eq!(check_sql(sql).len(), expected);
    }

    #[test]
    fn test_message_names_the_constant() {
        let diagnostics = check_sql("SELECT * FROM t WHERE 1 = 1");
        assert!(diagnostics[0].message.contains("1 = 1 is always true"));
    }

    #[test]
    fn test_select_list_constants_ignored() {
        assert!(check_sql("SELECT 1 = 1 AS flag FROM t").is_empty());
    }

    #[test]
    fn test_subquery_where_checked() {
        assert_eq!(
            check_sql("SELECT * FROM (SELECT * FROM t WHERE 1 = 1) AS s").len(),
            1
        );
    }
}
