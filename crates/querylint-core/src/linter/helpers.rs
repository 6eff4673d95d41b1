//! Shared pattern detection helpers for lint rules.

use crate::ast::{CaseExpr, Expr, ExprKind, FunctionCall, Ident, ObjectName};

/// Structural equality of two expressions.
///
/// Spans are ignored and identifiers compare case-insensitively unless
/// quoted. Forms without a dedicated comparison are never equivalent.
pub fn exprs_equivalent(a: &Expr, b: &Expr) -> bool {
    match (&a.kind, &b.kind) {
        (ExprKind::Column(left), ExprKind::Column(right)) => {
            idents_equivalent(&left.name, &right.name)
                && left.qualifier.len() == right.qualifier.len()
                && left
                    .qualifier
                    .iter()
                    .zip(&right.qualifier)
                    .all(|(l, r)| idents_equivalent(l, r))
        }
        (ExprKind::Literal(left), ExprKind::Literal(right)) => left == right,
        (
            ExprKind::Unary { op: lop, expr: lexpr },
            ExprKind::Unary { op: rop, expr: rexpr },
        ) => lop == rop && exprs_equivalent(lexpr, rexpr),
        (ExprKind::Binary(left), ExprKind::Binary(right)) => {
            left.op == right.op
                && exprs_equivalent(&left.left, &right.left)
                && exprs_equivalent(&left.right, &right.right)
        }
        (ExprKind::Function(left), ExprKind::Function(right)) => functions_equivalent(left, right),
        (ExprKind::Nested(left), ExprKind::Nested(right)) => exprs_equivalent(left, right),
        (
            ExprKind::Cast {
                expr: lexpr,
                data_type: ltype,
                ..
            },
            ExprKind::Cast {
                expr: rexpr,
                data_type: rtype,
                ..
            },
        ) => ltype.eq_ignore_ascii_case(rtype) && exprs_equivalent(lexpr, rexpr),
        (
            ExprKind::IsNull {
                expr: lexpr,
                negated: lneg,
            },
            ExprKind::IsNull {
                expr: rexpr,
                negated: rneg,
            },
        ) => lneg == rneg && exprs_equivalent(lexpr, rexpr),
        (ExprKind::List(left), ExprKind::List(right)) => all_equivalent(left, right),
        (ExprKind::Star { qualifier: left }, ExprKind::Star { qualifier: right }) => {
            match (left, right) {
                (None, None) => true,
                (Some(left), Some(right)) => names_equivalent(left, right),
                _ => false,
            }
        }
        (
            ExprKind::Field {
                expr: lexpr,
                field: lfield,
            },
            ExprKind::Field {
                expr: rexpr,
                field: rfield,
            },
        ) => idents_equivalent(lfield, rfield) && exprs_equivalent(lexpr, rexpr),
        (ExprKind::Raw { sql: left }, ExprKind::Raw { sql: right }) => left == right,
        _ => false,
    }
}

fn idents_equivalent(a: &Ident, b: &Ident) -> bool {
    if a.quoted || b.quoted {
        a.value == b.value
    } else {
        a.value.eq_ignore_ascii_case(&b.value)
    }
}

fn names_equivalent(a: &ObjectName, b: &ObjectName) -> bool {
    a.0.len() == b.0.len() && a.0.iter().zip(&b.0).all(|(l, r)| idents_equivalent(l, r))
}

fn all_equivalent(a: &[Expr], b: &[Expr]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(l, r)| exprs_equivalent(l, r))
}

fn functions_equivalent(a: &FunctionCall, b: &FunctionCall) -> bool {
    names_equivalent(&a.name, &b.name)
        && a.distinct == b.distinct
        && a.filter.is_none()
        && b.filter.is_none()
        && a.over.is_none()
        && b.over.is_none()
        && all_equivalent(&a.args, &b.args)
}

/// Returns true if the expression is a NULL literal, ignoring parentheses.
pub fn is_null_expr(expr: &Expr) -> bool {
    expr.unnested().is_null_literal()
}

/// If the CASE matches `CASE WHEN x IS NULL THEN y ELSE x END`, returns
/// `(x, y)` for rewriting to `COALESCE(x, y)`.
pub fn coalesce_replacement(case: &CaseExpr) -> Option<(&Expr, &Expr)> {
    if case.operand.is_some() || case.branches.len() != 1 {
        return None;
    }
    let else_expr = case.else_result.as_deref()?;
    let branch = &case.branches[0];
    match &branch.condition.unnested().kind {
        ExprKind::IsNull {
            expr,
            negated: false,
        } if exprs_equivalent(expr, else_expr) => Some((&**expr, &branch.result)),
        _ => None,
    }
}

/// Depth of CASE nesting at or below `expr` (0 when it holds no CASE).
pub fn case_depth(expr: &Expr) -> usize {
    let ExprKind::Case(case) = &expr.unnested().kind else {
        return 0;
    };
    let nested = case
        .operand
        .iter()
        .map(|operand| case_depth(operand))
        .chain(
            case.branches
                .iter()
                .flat_map(|branch| [&branch.condition, &branch.result])
                .map(case_depth),
        )
        .chain(case.else_result.iter().map(|result| case_depth(result)))
        .max()
        .unwrap_or(0);
    nested + 1
}

/// Returns true if `word` is a reserved SQL keyword that should not be used
/// as an alias.
pub fn is_reserved_keyword(word: &str) -> bool {
    let upper = word.to_ascii_uppercase();
    matches!(
        upper.as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "BETWEEN"
            | "BY"
            | "CASE"
            | "CAST"
            | "CHECK"
            | "COLUMN"
            | "CONSTRAINT"
            | "CREATE"
            | "CROSS"
            | "CURRENT"
            | "DATE"
            | "DEFAULT"
            | "DELETE"
            | "DESC"
            | "DISTINCT"
            | "DROP"
            | "ELSE"
            | "END"
            | "EXCEPT"
            | "EXISTS"
            | "FALSE"
            | "FETCH"
            | "FOR"
            | "FOREIGN"
            | "FROM"
            | "FULL"
            | "GRANT"
            | "GROUP"
            | "HAVING"
            | "IN"
            | "INNER"
            | "INSERT"
            | "INTERSECT"
            | "INTERVAL"
            | "INTO"
            | "IS"
            | "JOIN"
            | "KEY"
            | "LATERAL"
            | "LEFT"
            | "LIKE"
            | "LIMIT"
            | "NATURAL"
            | "NOT"
            | "NULL"
            | "OFFSET"
            | "ON"
            | "OR"
            | "ORDER"
            | "OUTER"
            | "OVER"
            | "PARTITION"
            | "PRIMARY"
            | "QUALIFY"
            | "REFERENCES"
            | "RIGHT"
            | "ROW"
            | "ROWS"
            | "SELECT"
            | "SET"
            | "TABLE"
            | "THEN"
            | "TIME"
            | "TIMESTAMP"
            | "TO"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UPDATE"
            | "USER"
            | "USING"
            | "VALUES"
            | "WHEN"
            | "WHERE"
            | "WINDOW"
            | "WITH"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::collect::{case_exprs, primary_core};
    use crate::linter::visit::Node;
    use crate::parser::parse_sql;

    fn select_exprs(sql: &str) -> Vec<Expr> {
        let statement = parse_sql(sql).unwrap().remove(0);
        primary_core(&statement)
            .unwrap()
            .columns
            .iter()
            .filter_map(|item| item.expr().cloned())
            .collect()
    }

    #[test]
    fn equivalence_ignores_position_and_case() {
        let exprs = select_exprs("SELECT UPPER(t.a), upper(T.A), upper(t.b)");
        assert!(exprs_equivalent(&exprs[0], &exprs[1]));
        assert!(!exprs_equivalent(&exprs[0], &exprs[2]));
    }

    #[test]
    fn quoted_identifiers_are_case_sensitive() {
        let exprs = select_exprs(r#"SELECT "A", "a""#);
        assert!(!exprs_equivalent(&exprs[0], &exprs[1]));
    }

    #[test]
    fn coalesce_pattern_is_recognized() {
        let statement = parse_sql("SELECT CASE WHEN a IS NULL THEN 0 ELSE a END FROM t")
            .unwrap()
            .remove(0);
        let cases = case_exprs(Node::Statement(&statement));
        let (checked, fallback) = coalesce_replacement(&cases[0]).unwrap();
        assert_eq!(checked.as_column().unwrap().name.value, "a");
        assert_eq!(fallback.as_literal().unwrap().value, "0");
    }

    #[test]
    fn coalesce_pattern_requires_matching_else() {
        let statement = parse_sql("SELECT CASE WHEN a IS NULL THEN 0 ELSE b END FROM t")
            .unwrap()
            .remove(0);
        let cases = case_exprs(Node::Statement(&statement));
        assert!(coalesce_replacement(&cases[0]).is_none());
    }

    #[test]
    fn case_depth_counts_nesting() {
        let exprs = select_exprs(
            "SELECT CASE WHEN a THEN CASE WHEN b THEN 1 ELSE CASE WHEN c THEN 2 END END END, a",
        );
        assert_eq!(case_depth(&exprs[0]), 3);
        assert_eq!(case_depth(&exprs[1]), 0);
    }

    #[test]
    fn reserved_keywords_are_case_insensitive() {
        assert!(is_reserved_keyword("select"));
        assert!(is_reserved_keyword("Order"));
        assert!(!is_reserved_keyword("orders"));
    }
}
