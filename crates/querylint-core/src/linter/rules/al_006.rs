//! LINT_AL_006: Unused table alias.
//!
//! A table aliased in FROM/JOIN whose alias no qualified reference in the
//! same SELECT (including its subqueries) ever uses.

use std::collections::HashSet;

use crate::ast::{Core, Expr, ExprKind, SelectItem, Statement, TableRef};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::{walk, Node, Visit};
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_006,
    name: "aliasing.unused",
    group: RuleGroup::Aliasing,
    description: "Table aliases should be referenced.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct UnusedTableAlias;

impl LintRule for UnusedTableAlias {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for core in cores(Node::Statement(statement)) {
            let used = used_qualifiers(core);
            for table in core.table_refs() {
                let TableRef::Named {
                    alias: Some(alias), ..
                } = table
                else {
                    continue;
                };
                if !used.contains(&alias.normalized()) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "Table alias '{}' is defined but never referenced.",
                            alias.value
                        ))
                        .with_span(alias.span),
                    );
                }
            }
        }
        diagnostics
    }
}

/// Lowercased table qualifiers used by columns and qualified stars.
fn used_qualifiers(core: &Core) -> HashSet<String> {
    let mut used = HashSet::new();
    let _ = walk(Node::Core(core), &mut |node| {
        let qualifier = match node {
            Node::SelectItem(SelectItem::QualifiedWildcard { qualifier, .. }) => qualifier.base(),
            Node::Expr(Expr {
                kind: ExprKind::Column(column),
                ..
            }) => column.table(),
            Node::Expr(Expr {
                kind:
                    ExprKind::Star {
                        qualifier: Some(qualifier),
                    },
                ..
            }) => qualifier.base(),
            _ => None,
        };
        if let Some(qualifier) = qualifier {
            used.insert(qualifier.normalized());
        }
        Visit::Continue
    });
    used
}
