//! LINT_AM_004: Set operation column count mismatch.
//!
//! For set operations (UNION/INTERSECT/EXCEPT), each branch should expose the
//! same number of result columns. Branch counts are compared against the
//! first branch only. A branch selecting `*` or `t.*` has no static count:
//! such branches are never compared, and when the first branch is one of
//! them the whole chain is skipped.

use std::collections::HashSet;

use crate::ast::{Body, Statement};
use crate::linter::collect::{collect, set_operation_branches};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Impact, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_004,
    name: "ambiguous.column_count",
    group: RuleGroup::Ambiguous,
    description: "Set operation branches should return the same number of columns.",
    default_severity: Severity::Error,
    config_keys: &[],
};

pub struct SetOperationColumnCount;

impl LintRule for SetOperationColumnCount {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut covered: HashSet<*const Body> = HashSet::new();
        let mut diagnostics = Vec::new();

        // Bodies arrive outermost first, so a chain is always seen from its
        // root before any of its parenthesized members.
        for body in collect::<&Body>(Node::Statement(statement)) {
            if !matches!(body, Body::SetOperation(_)) || covered.contains(&ptr_of(body)) {
                continue;
            }
            mark_chain(body, &mut covered);
            check_chain(body, ctx, &mut diagnostics);
        }
        diagnostics
    }
}

fn ptr_of(body: &Body) -> *const Body {
    body
}

/// Records every set operation in the chain rooted at `body`.
fn mark_chain(body: &Body, covered: &mut HashSet<*const Body>) {
    match body {
        Body::SetOperation(operation) => {
            covered.insert(ptr_of(body));
            mark_chain(&operation.left, covered);
            mark_chain(&operation.right, covered);
        }
        Body::Nested(query) => mark_chain(&query.body, covered),
        Body::Core(_) | Body::Values(_) => {}
    }
}

fn check_chain(root: &Body, ctx: &LintContext, diagnostics: &mut Vec<Diagnostic>) {
    let branches = set_operation_branches(root);
    let Some((first, rest)) = branches.split_first() else {
        return;
    };
    let Some(expected) = column_count(first) else {
        return;
    };

    for (offset, branch) in rest.iter().enumerate() {
        let Some(actual) = column_count(branch) else {
            continue;
        };
        if actual != expected {
            diagnostics.push(
                ctx.diagnostic(format!(
                    "Set operation branch {} returns {actual} column(s) but the first branch returns {expected} ({actual} vs {expected}).",
                    offset + 2
                ))
                .with_span(branch.span())
                .with_impact(Impact::Critical),
            );
        }
    }
}

/// Output column count of a terminal branch; `None` when it selects a star.
fn column_count(branch: &Body) -> Option<usize> {
    match branch {
        Body::Core(core) if core.has_star() => None,
        Body::Core(core) => Some(core.columns.len()),
        Body::Values(values) => values.rows.first().map(Vec::len),
        Body::SetOperation(_) | Body::Nested(_) => None,
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
            .flat_map(|statement| SetOperationColumnCount.check(statement, &ctx))
            .collect()
    }

    #[test]
    fn test_mismatch_flags_second_branch() {
        let diagnostics = check_sql("SELECT a, b FROM t UNION SELECT a FROM u");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, "LINT_AM_004");
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].impact, Some(Impact::Critical));
        assert!(diagnostics[0].message.contains("branch 2"));
        assert!(diagnostics[0].message.contains("(1 vs 2)"));
    }

    #[test]
    fn test_matching_counts_ok() {
        assert!(check_sql("SELECT a, b FROM t UNION ALL SELECT c, d FROM u").is_empty());
    }

    #[test]
    fn test_star_in_first_branch_skips_chain() {
        assert!(check_sql("SELECT * FROM t UNION SELECT a, b FROM u").is_empty());
        assert!(
            check_sql("SELECT * FROM t UNION SELECT a, b FROM u UNION SELECT c FROM v").is_empty()
        );
    }

    #[test]
    fn test_star_in_later_branch_is_skipped() {
        assert!(check_sql("SELECT a FROM t UNION SELECT u.* FROM u").is_empty());
    }

    #[test]
    fn test_each_branch_compared_to_first() {
        let diagnostics =
            check_sql("SELECT a FROM t UNION ALL SELECT a, b FROM u UNION ALL SELECT a, b FROM v");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[1].message.contains("branch 3"));
    }

    #[test]
    fn test_parenthesized_chain_reported_once() {
        let diagnostics =
            check_sql("(SELECT a FROM t UNION ALL SELECT a, b FROM u) UNION ALL SELECT c FROM v");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_long_chain_reported_once_per_branch() {
        let mut sql = vec!["SELECT a FROM t"; 100].join(" UNION ALL ");
        sql.push_str(" UNION ALL SELECT a, b FROM u");
        let diagnostics = check_sql(&sql);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("branch 101"));
    }

    #[test]
    fn test_chain_inside_subquery_checked_separately() {
        let diagnostics = check_sql(
            "SELECT a FROM t WHERE a IN (SELECT x FROM v UNION SELECT x, y FROM w) \
             UNION SELECT a, b FROM u",
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_set_operation_in_cte() {
        let diagnostics = check_sql(
            "WITH c AS (SELECT 1 AS x UNION ALL SELECT 1, 2) SELECT * FROM c",
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_non_set_query_ok() {
        assert!(check_sql("SELECT a, b FROM t").is_empty());
    }
}
