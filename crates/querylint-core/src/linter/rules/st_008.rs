//! LINT_ST_008: Reversed JOIN condition ordering.
//!
//! Detect predicates where the newly joined relation appears on the left side
//! and a prior relation on the right side (e.g. `o.user_id = u.id` in
//! `FROM u JOIN o`). Joins are checked left to right against every table
//! joined so far, so later joins may refer to any earlier table.
//!
//! `preferred_first_table_in_join_clause` set to `later` inverts the check.

use crate::ast::{BinaryOperator, ColumnRef, Core, Expr, ExprKind, From, Statement, TableRef};
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_008,
    name: "structure.join_condition_order",
    group: RuleGroup::Structure,
    description: "Join conditions should reference the earlier table first.",
    default_severity: Severity::Info,
    config_keys: &["preferred_first_table_in_join_clause"],
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PreferredFirstTable {
    Earlier,
    Later,
}

impl PreferredFirstTable {
    fn from_context(ctx: &LintContext) -> Self {
        match ctx
            .option_str("preferred_first_table_in_join_clause")
            .unwrap_or("earlier")
            .to_ascii_lowercase()
            .as_str()
        {
            "later" => Self::Later,
            _ => Self::Earlier,
        }
    }
}

/// Which side of the join a qualifier resolves to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Known,
    Joined,
}

pub struct JoinConditionOrder;

impl LintRule for JoinConditionOrder {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let preferred = PreferredFirstTable::from_context(ctx);
        let mut diagnostics = Vec::new();
        for core in cores(Node::Statement(statement)) {
            check_core(core, preferred, ctx, &mut diagnostics);
        }
        diagnostics
    }
}

fn check_core(
    core: &Core,
    preferred: PreferredFirstTable,
    ctx: &LintContext,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(from) = &core.from {
        check_from(from, preferred, ctx, diagnostics);
    }
}

/// A parenthesized join is checked as its own join list.
fn check_from(
    from: &From,
    preferred: PreferredFirstTable,
    ctx: &LintContext,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for table in std::iter::once(&from.source).chain(from.joins.iter().map(|join| &join.table)) {
        if let TableRef::NestedJoin { from: nested, .. } = table {
            check_from(nested, preferred, ctx, diagnostics);
        }
    }

    let mut known: Vec<String> = from
        .source
        .reference_name()
        .map(|name| name.normalized())
        .into_iter()
        .collect();

    for join in &from.joins {
        let joined = join.table.reference_name().map(|name| name.normalized());

        if let (Some(joined), Some(condition)) = (joined.as_deref(), &join.condition) {
            if !known.iter().any(|name| name == joined) {
                for equality in equalities(condition) {
                    if let Some(diagnostic) =
                        check_equality(equality, &known, joined, preferred, ctx)
                    {
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        known.extend(joined);
    }
}

/// Top-level equalities of a join condition, looking through AND and
/// parentheses.
fn equalities(condition: &Expr) -> Vec<&Expr> {
    match &condition.kind {
        ExprKind::Nested(inner) => equalities(inner),
        ExprKind::Binary(binary) if binary.op == BinaryOperator::And => {
            let mut found = equalities(&binary.left);
            found.extend(equalities(&binary.right));
            found
        }
        ExprKind::Binary(binary) if binary.op == BinaryOperator::Eq => vec![condition],
        _ => Vec::new(),
    }
}

fn check_equality(
    equality: &Expr,
    known: &[String],
    joined: &str,
    preferred: PreferredFirstTable,
    ctx: &LintContext,
) -> Option<Diagnostic> {
    let ExprKind::Binary(binary) = &equality.kind else {
        return None;
    };
    let left = binary.left.unnested().as_column()?;
    let right = binary.right.unnested().as_column()?;
    let left_side = resolve(left, known, joined)?;
    let right_side = resolve(right, known, joined)?;

    let reversed = match preferred {
        PreferredFirstTable::Earlier => left_side == Side::Joined && right_side == Side::Known,
        PreferredFirstTable::Later => left_side == Side::Known && right_side == Side::Joined,
    };
    if !reversed {
        return None;
    }

    let expected_first = match preferred {
        PreferredFirstTable::Earlier => "earlier",
        PreferredFirstTable::Later => "later",
    };
    Some(
        ctx.diagnostic(format!(
            "Join condition '{left} = {right}' should list the {expected_first} table first: '{right} = {left}'."
        ))
        .with_span(equality.span),
    )
}

fn resolve(column: &ColumnRef, known: &[String], joined: &str) -> Option<Side> {
    let qualifier = column.table()?.normalized();
    if qualifier == joined {
        Some(Side::Joined)
    } else if known.iter().any(|name| *name == qualifier) {
        Some(Side::Known)
    } else {
        None
    }
}
