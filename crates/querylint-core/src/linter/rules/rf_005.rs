//! LINT_RF_005: References special chars.
//!
//! Quoted identifiers may contain anything, which makes them awkward to
//! reference. Flag quoted names with characters outside `[A-Za-z0-9_]`.
//! Extra characters can be allowed via `additional_allowed_characters`,
//! given either as a string (`"-,."`) or a list of strings.

use std::collections::HashSet;

use serde_json::Value;

use crate::ast::{Ident, Statement, TableRef};
use crate::linter::collect::{column_refs, cores, cte_names, table_refs};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_RF_005,
    name: "references.special_chars",
    group: RuleGroup::References,
    description: "Avoid special characters in identifiers.",
    default_severity: Severity::Info,
    config_keys: &["additional_allowed_characters"],
};

pub struct ReferencesSpecialChars;

impl LintRule for ReferencesSpecialChars {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let allowed = additional_allowed_characters(ctx);
        identifiers(statement)
            .into_iter()
            .filter(|ident| ident.quoted && contains_disallowed_chars(&ident.value, &allowed))
            .map(|ident| {
                ctx.diagnostic(format!(
                    "Identifier '{}' contains special characters.",
                    ident.value
                ))
                .with_span(ident.span)
            })
            .collect()
    }
}

/// Every identifier naming a table, alias, column or CTE, in walk order.
fn identifiers(statement: &Statement) -> Vec<&Ident> {
    let root = Node::Statement(statement);
    let mut found: Vec<&Ident> = cte_names(root);

    for table in table_refs(root) {
        if let TableRef::Named { name, .. } = table {
            found.extend(&name.0);
        }
        found.extend(table.alias());
    }
    for column in column_refs(root) {
        let column = column.node;
        found.extend(&column.qualifier);
        found.push(&column.name);
    }
    for core in cores(root) {
        found.extend(core.columns.iter().filter_map(|item| item.alias()));
    }
    found
}

fn contains_disallowed_chars(ident: &str, additional_allowed: &HashSet<char>) -> bool {
    ident
        .chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || ch == '_' || additional_allowed.contains(&ch)))
}

fn additional_allowed_characters(ctx: &LintContext) -> HashSet<char> {
    match ctx.option("additional_allowed_characters") {
        Some(Value::String(value)) => value
            .split(',')
            .flat_map(|item| item.trim().chars())
            .collect(),
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .flat_map(str::chars)
            .collect(),
        _ => HashSet::new(),
    }
}
