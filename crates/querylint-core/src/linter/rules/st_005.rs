//! LINT_ST_005: Structure subquery.
//!
//! Derived tables in FROM or JOIN are usually clearer as CTEs. The
//! `forbid_subquery_in` option selects where they are reported: `join`
//! (default), `from` or `both`. Comma-separated FROM items count as FROM.

use crate::ast::{JoinKind, Statement, TableRef};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_005,
    name: "structure.subquery",
    group: RuleGroup::Structure,
    description: "Join/From clauses should not contain subqueries. Use CTEs instead.",
    default_severity: Severity::Info,
    config_keys: &["forbid_subquery_in"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForbidSubqueryIn {
    Join,
    From,
    Both,
}

impl ForbidSubqueryIn {
    fn from_context(ctx: &LintContext) -> Self {
        match ctx
            .option_str("forbid_subquery_in")
            .unwrap_or("join")
            .to_ascii_lowercase()
            .as_str()
        {
            "from" => Self::From,
            "both" => Self::Both,
            _ => Self::Join,
        }
    }

    fn forbids_from(self) -> bool {
        matches!(self, Self::From | Self::Both)
    }

    fn forbids_join(self) -> bool {
        matches!(self, Self::Join | Self::Both)
    }
}

pub struct Subquery;

impl LintRule for Subquery {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let policy = ForbidSubqueryIn::from_context(ctx);
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            let Some(from) = &core.from else {
                continue;
            };
            let sources = std::iter::once((&from.source, "FROM")).chain(from.joins.iter().map(
                |join| match join.kind {
                    JoinKind::Implicit => (&join.table, "FROM"),
                    _ => (&join.table, "JOIN"),
                },
            ));

            for (table, clause) in sources {
                if !matches!(table, TableRef::Derived { .. } | TableRef::Lateral { .. }) {
                    continue;
                }
                let forbidden = match clause {
                    "FROM" => policy.forbids_from(),
                    _ => policy.forbids_join(),
                };
                if forbidden {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Subquery in {clause} clause; move it into a CTE."
                        ))
                        .with_span(table.span()),
                    );
                }
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;
    use crate::types::Dialect;
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    fn check_with(sql: &str, policy: &str) -> Vec<Diagnostic> {
        let options: Map<String, Value> = json!({ "forbid_subquery_in": policy })
            .as_object()
            .cloned()
            .unwrap_or_default();
        let ctx = LintContext::new(&META, Dialect::Generic).with_options(Some(&options));
        parse_sql(sql)
            .unwrap()
            .iter()
            .flat_map(|statement| Subquery.check(statement, &ctx))
            .collect()
    }

    const IN_FROM: &str = "SELECT * FROM (SELECT id FROM t) AS s";
    const IN_JOIN: &str = "SELECT * FROM t JOIN (SELECT id FROM u) AS s ON t.id = s.id";

    #[rstest]
    #[case(IN_FROM, "join", 0)]
    #[case(IN_JOIN, "join", 1)]
    #[case(IN_FROM, "from", 1)]
    #[case(IN_JOIN, "from", 0)]
    #[case(IN_FROM, "both", 1)]
    #[case(IN_JOIN, "both", 1)]
    fn test_policies(#[case] sql: &str, #[case] policy: &str, #[case] expected: usize) {
        assert_eq!(check_with(sql, policy).len(), expected);
    }

    #[test]
    fn test_comma_joined_subquery_counts_as_from() {
        let sql = "SELECT * FROM t, (SELECT id FROM u) AS s";
        assert!(check_with(sql, "join").is_empty());
        assert_eq!(check_with(sql, "from").len(), 1);
    }

    #[test]
    fn test_plain_tables_ok() {
        assert!(check_with("SELECT * FROM t JOIN u ON t.id = u.id", "both").is_empty());
    }
}
