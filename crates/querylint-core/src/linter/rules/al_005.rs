//! LINT_AL_005: Self alias column.
//!
//! `SELECT col AS col` renames a column to its own name.

use crate::ast::{Ident, SelectItem, Statement};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_005,
    name: "aliasing.self_alias.column",
    group: RuleGroup::Aliasing,
    description: "Column aliases should not alias to itself.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct SelfAliasColumn;

impl LintRule for SelfAliasColumn {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            for item in &core.columns {
                let SelectItem::Expr {
                    expr,
                    alias: Some(alias),
                } = item
                else {
                    continue;
                };
                let Some(column) = expr.unnested().as_column() else {
                    continue;
                };
                if same_name(&column.name, alias) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Column '{column}' is aliased to its own name '{alias}'."
                        ))
                        .with_span(item.span())
                        .fixable(),
                    );
                }
            }
        }
        diagnostics
    }
}

fn same_name(column: &Ident, alias: &Ident) -> bool {
    if column.quoted || alias.quoted {
        column.value == alias.value
    } else {
        column.value.eq_ignore_ascii_case(&alias.value)
    }
}
