//! LINT_RF_004: References keywords.
//!
//! Aliases that are reserved words read poorly and break on dialects that
//! reserve them. Quoted aliases are left alone.

use crate::ast::{Ident, Statement};
use crate::linter::collect::{cores, cte_names, table_refs};
use crate::linter::helpers::is_reserved_keyword;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_RF_004,
    name: "references.keywords",
    group: RuleGroup::References,
    description: "Avoid using SQL keywords as identifiers.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct ReferencesKeywords;

impl LintRule for ReferencesKeywords {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let root = Node::Statement(statement);
        let mut candidates: Vec<(&Ident, &str)> = Vec::new();

        candidates.extend(cte_names(root).into_iter().map(|name| (name, "CTE name")));
        candidates.extend(
            table_refs(root)
                .into_iter()
                .filter_map(|table| table.alias())
                .map(|alias| (alias, "Table alias")),
        );
        for core in cores(root) {
            candidates.extend(
                core.columns
                    .iter()
                    .filter_map(|item| item.alias())
                    .map(|alias| (alias, "Column alias")),
            );
        }

        candidates
            .into_iter()
            .filter(|(ident, _)| !ident.quoted && is_reserved_keyword(&ident.value))
            .map(|(ident, kind)| {
                ctx.diagnostic(format!(
                    "{kind} '{}' is a reserved keyword; choose another name or quote it.",
                    ident.value
                ))
                .with_span(ident.span)
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
            .flat_map(|statement| ReferencesKeywords.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_keyword_column_alias_detected() {
        let diagnostics = check_sql("SELECT created_at AS date FROM t");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("Column alias 'date'"));
    }

    #[test]
    fn test_keyword_table_alias_detected() {
        let diagnostics = check_sql("SELECT * FROM users AS date");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("Table alias"));
    }

    #[test]
    fn test_quoted_keyword_alias_ok() {
        assert!(check_sql("SELECT created_at AS \"date\" FROM t").is_empty());
    }

    #[test]
    fn test_plain_alias_ok() {
        assert!(check_sql("SELECT created_at AS created FROM users u").is_empty());
    }

    #[test]
    fn test_keyword_in_string_literal_ok() {
        assert!(check_sql("SELECT 'select' AS label FROM t").is_empty());
    }
}
