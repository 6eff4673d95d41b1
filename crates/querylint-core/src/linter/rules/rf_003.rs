//! LINT_RF_003: References consistency.
//!
//! In single-table selects, avoid mixing qualified and unqualified
//! references. `single_table_references` can instead require one style.

use std::collections::HashSet;

use crate::ast::{ColumnRef, Core, Statement};
use crate::linter::collect::{core_scope_columns, cores, Located};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_RF_003,
    name: "references.consistent",
    group: RuleGroup::References,
    description: "Avoid mixing qualified and unqualified references.",
    default_severity: Severity::Info,
    config_keys: &["single_table_references"],
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ReferenceStyle {
    Consistent,
    Qualified,
    Unqualified,
}

impl ReferenceStyle {
    fn from_context(ctx: &LintContext) -> Self {
        match ctx
            .option_str("single_table_references")
            .unwrap_or("consistent")
            .to_ascii_lowercase()
            .as_str()
        {
            "qualified" => Self::Qualified,
            "unqualified" => Self::Unqualified,
            _ => Self::Consistent,
        }
    }
}

pub struct ReferencesConsistent;

impl LintRule for ReferencesConsistent {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let style = ReferenceStyle::from_context(ctx);
        cores(Node::Statement(statement))
            .into_iter()
            .filter(|core| core.table_refs().count() == 1)
            .flat_map(|core| check_core(core, style, ctx))
            .collect()
    }
}

fn check_core(core: &Core, style: ReferenceStyle, ctx: &LintContext) -> Vec<Diagnostic> {
    let columns = table_columns(core);

    match style {
        ReferenceStyle::Consistent => {
            let Some(first) = columns.first() else {
                return Vec::new();
            };
            let expected = first.is_qualified();
            columns
                .iter()
                .find(|column| column.is_qualified() != expected)
                .map(|column| {
                    ctx.diagnostic("Avoid mixing qualified and unqualified references.")
                        .with_span(column.span)
                })
                .into_iter()
                .collect()
        }
        ReferenceStyle::Qualified => columns
            .iter()
            .filter(|column| !column.is_qualified())
            .map(|column| {
                ctx.diagnostic(format!(
                    "Reference '{}' should be qualified with its table name.",
                    column.name
                ))
                .with_span(column.span)
            })
            .collect(),
        ReferenceStyle::Unqualified => columns
            .iter()
            .filter(|column| column.is_qualified())
            .map(|column| {
                ctx.diagnostic(format!(
                    "Reference '{}' should not be qualified in a single-table select.",
                    **column
                ))
                .with_span(column.span)
            })
            .collect(),
    }
}

/// Column references in the core that can refer to the table, leaving out
/// bare names that match a select-list alias.
fn table_columns(core: &Core) -> Vec<Located<'_, ColumnRef>> {
    let aliases: HashSet<String> = core
        .columns
        .iter()
        .filter_map(|item| item.alias())
        .map(|alias| alias.normalized())
        .collect();

    core_scope_columns(core)
        .into_iter()
        .filter(|column| column.is_qualified() || !aliases.contains(&column.name.normalized()))
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
            .flat_map(|statement| ReferencesConsistent.check(statement, &ctx))
            .collect()
    }

    fn check_sql(sql: &str) -> Vec<Diagnostic> {
        check_with(sql, json!({}))
    }

    #[test]
    fn test_mixed_qualification_detected() {
        assert_eq!(check_sql("SELECT my_tbl.bar, baz FROM my_tbl").len(), 1);
    }

    #[test]
    fn test_consistently_unqualified_ok() {
        assert!(check_sql("SELECT bar FROM my_tbl").is_empty());
    }

    #[test]
    fn test_consistently_qualified_ok() {
        assert!(check_sql("SELECT my_tbl.bar FROM my_tbl").is_empty());
    }

    #[test]
    fn test_mixed_in_subquery_detected() {
        assert_eq!(
            check_sql("SELECT * FROM (SELECT my_tbl.bar, baz FROM my_tbl) AS s").len(),
            1
        );
    }

    #[test]
    fn test_multi_table_select_ignored() {
        assert!(check_sql("SELECT a.x, y FROM a JOIN b ON a.id = b.id").is_empty());
    }

    #[test]
    fn test_select_alias_not_counted() {
        assert!(check_sql("SELECT t.a + 1 AS b FROM t ORDER BY b").is_empty());
    }

    #[test]
    fn test_qualified_style_flags_each_bare_reference() {
        let diagnostics = check_with(
            "SELECT a, b FROM t",
            json!({"single_table_references": "qualified"}),
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_unqualified_style_flags_qualified_reference() {
        let diagnostics = check_with(
            "SELECT t.a, b FROM t",
            json!({"single_table_references": "unqualified"}),
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'t.a'"));
    }
}
