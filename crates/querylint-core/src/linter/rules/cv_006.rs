//! LINT_CV_006: CASE written as COALESCE.
//!
//! `CASE WHEN x IS NULL THEN y ELSE x END` is `COALESCE(x, y)`.

use crate::ast::Statement;
use crate::linter::collect::case_exprs;
use crate::linter::helpers::coalesce_replacement;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_006,
    name: "convention.case_coalesce",
    group: RuleGroup::Convention,
    description: "Use COALESCE instead of a CASE that tests one value for NULL.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct CaseAsCoalesce;

impl LintRule for CaseAsCoalesce {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        case_exprs(Node::Statement(statement))
            .into_iter()
            .filter(|case| coalesce_replacement(case).is_some())
            .map(|case| {
                ctx.diagnostic("CASE expression can be simplified to COALESCE.")
                    .with_span(case.span)
                    .fixable()
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
            .flat_map(|statement| CaseAsCoalesce.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_coalesce_pattern_detected() {
        let diagnostics = check_sql("SELECT CASE WHEN x IS NULL THEN 'default' ELSE x END FROM t");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fixable);
    }

    #[test]
    fn test_different_else_ok() {
        assert!(check_sql("SELECT CASE WHEN x IS NULL THEN 'default' ELSE y END FROM t").is_empty());
    }

    #[test]
    fn test_multiple_branches_ok() {
        assert!(check_sql(
            "SELECT CASE WHEN x IS NULL THEN 'a' WHEN x = 1 THEN 'b' ELSE x END FROM t"
        )
        .is_empty());
    }

    #[test]
    fn test_is_not_null_ok() {
        assert!(check_sql("SELECT CASE WHEN x IS NOT NULL THEN 'a' ELSE x END FROM t").is_empty());
    }
}
