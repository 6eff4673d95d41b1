//! LINT_RF_001: References from.
//!
//! A qualified column reference must name a table or alias that appears
//! somewhere in the statement. Multi-part qualifiers (`schema.t.col`, or
//! struct access such as `t.rec.field`) match when any part does.

use std::collections::HashSet;

use crate::ast::{Statement, TableRef};
use crate::linter::collect::{column_refs, referenced_table_aliases, table_refs};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_RF_001,
    name: "references.from",
    group: RuleGroup::References,
    description: "Qualified references should refer to a table or alias in FROM.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct ReferencesFrom;

impl LintRule for ReferencesFrom {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let root = Node::Statement(statement);
        let tables = table_refs(root);
        if tables.is_empty() {
            return Vec::new();
        }

        // Aliased tables stay reachable by their bare name too.
        let mut known: HashSet<String> = referenced_table_aliases(root)
            .into_iter()
            .map(|name| name.normalized())
            .collect();
        for table in tables {
            if let TableRef::Named { name, .. } = table {
                known.extend(name.base().map(|base| base.normalized()));
            }
        }

        column_refs(root)
            .into_iter()
            .filter(|column| {
                column.is_qualified()
                    && !column
                        .qualifier
                        .iter()
                        .any(|part| known.contains(&part.normalized()))
            })
            .map(|column| {
                let qualifier = column
                    .table()
                    .map_or_else(String::new, |table| table.value.clone());
                ctx.diagnostic(format!(
                    "Reference '{}' uses qualifier '{qualifier}', which matches no table or alias in the statement.",
                    *column
                ))
                .with_span(column.span)
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
            .flat_map(|statement| ReferencesFrom.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_unknown_qualifier_detected() {
        let diagnostics = check_sql("SELECT x.id FROM users u");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'x.id'"));
    }

    #[test]
    fn test_alias_and_table_name_ok() {
        assert!(check_sql("SELECT u.id, orders.total FROM users u JOIN orders ON u.id = orders.uid")
            .is_empty());
    }

    #[test]
    fn test_outer_alias_in_subquery_ok() {
        assert!(check_sql(
            "SELECT * FROM users u WHERE EXISTS (SELECT 1 FROM orders o WHERE o.uid = u.id)"
        )
        .is_empty());
    }

    #[test]
    fn test_schema_qualified_reference_ok() {
        assert!(check_sql("SELECT public.users.id FROM public.users").is_empty());
    }

    #[test]
    fn test_tables_inside_parenthesized_join_ok() {
        assert!(check_sql(
            "SELECT t.id, c.id FROM t JOIN (u JOIN c ON u.id = c.id) ON t.id = u.id"
        )
        .is_empty());
        assert!(check_sql("SELECT x.id FROM (a JOIN b ON a.id = b.id) AS x").is_empty());
    }

    #[test]
    fn test_unknown_qualifier_inside_parenthesized_join_detected() {
        let diagnostics =
            check_sql("SELECT * FROM t JOIN (u JOIN c ON u.id = z.id) ON t.id = u.id");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'z.id'"));
    }

    #[test]
    fn test_unknown_qualifier_inside_keyword_function_detected() {
        let diagnostics = check_sql("SELECT EXTRACT(YEAR FROM z.created_at) FROM users u");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'z.created_at'"));
    }

    #[test]
    fn test_unqualified_columns_ok() {
        assert!(check_sql("SELECT id FROM users").is_empty());
    }

    #[test]
    fn test_statement_without_tables_ok() {
        assert!(check_sql("SELECT 1").is_empty());
    }
}
