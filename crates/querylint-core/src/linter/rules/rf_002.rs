//! LINT_RF_002: References qualification.
//!
//! When a SELECT reads from more than one table, every column reference
//! should say which table it comes from. Names matching a select-list alias
//! (`ORDER BY total`) are not table columns and are skipped.

use std::collections::HashSet;

use crate::ast::{Core, Statement};
use crate::linter::collect::{core_scope_columns, cores};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_RF_002,
    name: "references.qualification",
    group: RuleGroup::References,
    description: "References should be qualified if select has more than one referenced table.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct ReferencesQualification;

impl LintRule for ReferencesQualification {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        cores(Node::Statement(statement))
            .into_iter()
            .filter(|core| core.table_refs().count() > 1)
            .flat_map(|core| check_core(core, ctx))
            .collect()
    }
}

fn check_core(core: &Core, ctx: &LintContext) -> Vec<Diagnostic> {
    let aliases: HashSet<String> = core
        .columns
        .iter()
        .filter_map(|item| item.alias())
        .map(|alias| alias.normalized())
        .collect();

    core_scope_columns(core)
        .into_iter()
        .filter(|column| !column.is_qualified() && !aliases.contains(&column.name.normalized()))
        .map(|column| {
            ctx.diagnostic(format!(
                "Unqualified reference '{}' found in a select with multiple tables.",
                column.name
            ))
            .with_span(column.span)
        })
        .collect()
}
