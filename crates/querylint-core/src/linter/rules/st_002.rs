//! LINT_ST_002: Unnecessary ELSE NULL.
//!
//! A CASE without ELSE already yields NULL when no branch matches.

use crate::ast::Statement;
use crate::linter::collect::case_exprs;
use crate::linter::helpers::is_null_expr;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_002,
    name: "structure.else_null",
    group: RuleGroup::Structure,
    description: "ELSE NULL is redundant in a CASE expression.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct UnnecessaryElseNull;

impl LintRule for UnnecessaryElseNull {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        case_exprs(Node::Statement(statement))
            .into_iter()
            .filter_map(|case| {
                let else_result = case.else_result.as_deref()?;
                is_null_expr(else_result).then(|| {
                    ctx.diagnostic("ELSE NULL is redundant; CASE returns NULL when no branch matches.")
                        .with_span(else_result.span)
                        .fixable()
                })
            })
            .collect()
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
            .flat_map(|statement| UnnecessaryElseNull.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_else_null_detected() {
        let diagnostics = check_sql("SELECT CASE WHEN x > 1 THEN 'a' ELSE NULL END FROM t");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fixable);
    }

    #[test]
    fn test_no_else_ok() {
        assert!(check_sql("SELECT CASE WHEN x > 1 THEN 'a' END FROM t").is_empty());
    }

    #[test]
    fn test_else_value_ok() {
        assert!(check_sql("SELECT CASE WHEN x > 1 THEN 'a' ELSE 'b' END FROM t").is_empty());
    }
}
