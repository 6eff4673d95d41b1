//! LINT_ST_001: Unused CTE.
//!
//! A CTE (WITH clause) is defined but never referenced in the query body
//! or in any CTE of the same WITH clause. This is likely dead code.
//!
//! Usage is collected from the main body and from every CTE body, whether or
//! not that CTE is itself used. A chain of CTEs that only reference each
//! other is therefore not reported.

use std::collections::HashSet;

use crate::ast::{Query, Statement, TableRef};
use crate::linter::collect::{queries, table_refs};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_001,
    name: "structure.unused_cte",
    group: RuleGroup::Structure,
    description: "CTE defined in WITH clause but never referenced.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct UnusedCte;

impl LintRule for UnusedCte {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for query in queries(Node::Statement(statement)) {
            if query.ctes.is_empty() {
                continue;
            }
            let used = referenced_names(query);
            for cte in &query.ctes {
                if !used.contains(&cte.name.normalized()) {
                    diagnostics.push(
                        ctx.diagnostic(format!(
                            "CTE '{}' is defined but never referenced.",
                            cte.name.value
                        ))
                        .with_span(cte.name.span),
                    );
                }
            }
        }
        diagnostics
    }
}

/// Lowercased table names read by the query body or by any of its CTEs.
fn referenced_names(query: &Query) -> HashSet<String> {
    let roots = std::iter::once(Node::Body(&query.body))
        .chain(query.ctes.iter().map(|cte| Node::Query(&cte.query)));

    let mut used = HashSet::new();
    for root in roots {
        for table in table_refs(root) {
            if let TableRef::Named { name, .. } = table {
                if let Some(base) = name.base() {
                    used.insert(base.normalized());
                }
            }
        }
    }
    used
}
