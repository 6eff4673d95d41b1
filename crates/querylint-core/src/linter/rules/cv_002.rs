//! LINT_CV_002: Row counting style.
//!
//! `COUNT(*)`, `COUNT(1)` and `COUNT(0)` all count rows. `COUNT(*)` is
//! preferred unless `prefer_count_1` or `prefer_count_0` is set; when both
//! are set `prefer_count_1` wins.

use crate::ast::{ExprKind, FunctionCall, LiteralKind, Statement};
use crate::linter::collect::functions;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_002,
    name: "convention.count_rows",
    group: RuleGroup::Convention,
    description: "Use a consistent form to count rows.",
    default_severity: Severity::Info,
    config_keys: &["prefer_count_1", "prefer_count_0"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountForm {
    Star,
    One,
    Zero,
}

impl CountForm {
    fn of(function: &FunctionCall) -> Option<Self> {
        if !function.is_named("COUNT") || function.distinct || function.args.len() != 1 {
            return None;
        }
        match &function.args[0].kind {
            ExprKind::Star { qualifier: None } => Some(Self::Star),
            ExprKind::Literal(literal) if literal.kind == LiteralKind::Number => {
                match literal.value.as_str() {
                    "1" => Some(Self::One),
                    "0" => Some(Self::Zero),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::Star => "COUNT(*)",
            Self::One => "COUNT(1)",
            Self::Zero => "COUNT(0)",
        }
    }
}

pub struct CountRows;

impl LintRule for CountRows {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let preferred = if ctx.option_bool("prefer_count_1").unwrap_or(false) {
            CountForm::One
        } else if ctx.option_bool("prefer_count_0").unwrap_or(false) {
            CountForm::Zero
        } else {
            CountForm::Star
        };

        functions(Node::Statement(statement))
            .into_iter()
            .filter_map(|function| {
                let form = CountForm::of(&function)?;
                (form != preferred).then(|| {
                    ctx.diagnostic(format!(
                        "Use {} instead of {} to count rows.",
                        preferred.sql(),
                        form.sql()
                    ))
                    .with_span(function.span)
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
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    fn check_with(sql: &str, options: Value) -> Vec<Diagnostic> {
        let options: Map<String, Value> = options.as_object().cloned().unwrap_or_default();
        let ctx = LintContext::new(&META, Dialect::Generic).with_options(Some(&options));
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| CountRows.check(statement, &ctx))
            .collect()
    }

    #[rstest]
    #[case("SELECT COUNT(1) FROM t", 1)]
    #[case("SELECT COUNT(0) FROM t", 1)]
    #[case("SELECT COUNT(*) FROM t", 0)]
    #[case("SELECT COUNT(a) FROM t", 0)]
    #[case("SELECT COUNT(DISTINCT 1) FROM t", 0)]
    fn test_default_prefers_star(#[case] sql: &str, #[case] expected: usize) {
        assert_eq!(check_with(sql, json!({})).len(), expected);
    }

    #[test]
    fn test_prefer_count_1() {
        let diagnostics = check_with(
            "SELECT COUNT(*), COUNT(1), COUNT(0) FROM t",
            json!({"prefer_count_1": true}),
        );
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.contains("Use COUNT(1) instead of COUNT(*)"));
    }

    #[test]
    fn test_prefer_count_1_wins_over_prefer_count_0() {
        let diagnostics = check_with(
            "SELECT COUNT(1) FROM t",
            json!({"prefer_count_1": true, "prefer_count_0": true}),
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_prefer_count_0() {
        let diagnostics = check_with("SELECT COUNT(0), COUNT(*) FROM t", json!({"prefer_count_0": true}));
        assert_eq!(diagnostics.len(), 1);
    }
}
