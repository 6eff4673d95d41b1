//! Depth-first traversal over the lint node model.
//!
//! [`walk`] is the single place that knows how to reach every child of every
//! node. It matches exhaustively over the node enums, so adding a variant to
//! [`crate::ast`] without teaching the walker about it fails to compile.

use std::ops::ControlFlow;

use crate::ast::{self, Body, Expr, ExprKind, SelectItem, Statement, TableRef};
use crate::types::Span;

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the node's children.
    Continue,
    /// Do not descend into this node's children, but keep walking siblings.
    Skip,
    /// Terminate the entire walk.
    Stop,
}

/// A borrowed reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Statement(&'a Statement),
    Query(&'a ast::Query),
    Cte(&'a ast::Cte),
    Body(&'a Body),
    Core(&'a ast::Core),
    SelectItem(&'a SelectItem),
    From(&'a ast::From),
    Join(&'a ast::Join),
    TableRef(&'a TableRef),
    OrderBy(&'a ast::OrderByExpr),
    Expr(&'a Expr),
}

impl Node<'_> {
    pub fn span(&self) -> Span {
        match self {
            Node::Statement(statement) => statement.span(),
            Node::Query(query) => query.span,
            Node::Cte(cte) => cte.span,
            Node::Body(body) => body.span(),
            Node::Core(core) => core.span,
            Node::SelectItem(item) => item.span(),
            Node::From(from) => from
                .joins
                .iter()
                .fold(from.source.span(), |span, join| span.union(&join.span)),
            Node::Join(join) => join.span,
            Node::TableRef(table) => table.span(),
            Node::OrderBy(order_by) => order_by.expr.span,
            Node::Expr(expr) => expr.span,
        }
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a ast::Query> for Node<'a> {
    fn from(query: &'a ast::Query) -> Self {
        Node::Query(query)
    }
}

impl<'a> From<&'a ast::Core> for Node<'a> {
    fn from(core: &'a ast::Core) -> Self {
        Node::Core(core)
    }
}

impl<'a> From<&'a Body> for Node<'a> {
    fn from(body: &'a Body) -> Self {
        Node::Body(body)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}

/// Walks `node` depth-first, pre-order, calling `visit` on every node.
///
/// Returns `ControlFlow::Break` if some visit returned [`Visit::Stop`].
pub fn walk<'a, F>(node: Node<'a>, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    match visit(node) {
        Visit::Continue => walk_children(node, visit),
        Visit::Skip => ControlFlow::Continue(()),
        Visit::Stop => ControlFlow::Break(()),
    }
}

fn walk_children<'a, F>(node: Node<'a>, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    match node {
        Node::Statement(statement) => match statement {
            Statement::Query(query) => walk(Node::Query(query), visit),
            Statement::Insert { source, .. } => match source {
                Some(query) => walk(Node::Query(query), visit),
                None => ControlFlow::Continue(()),
            },
            Statement::CreateView { query, .. } | Statement::CreateTableAs { query, .. } => {
                walk(Node::Query(query), visit)
            }
            Statement::Other { .. } => ControlFlow::Continue(()),
        },
        Node::Query(query) => {
            for cte in &query.ctes {
                walk(Node::Cte(cte), visit)?;
            }
            walk(Node::Body(&query.body), visit)?;
            walk_order_by(&query.order_by, visit)?;
            walk_opt(query.limit.as_ref(), visit)?;
            walk_opt(query.offset.as_ref(), visit)
        }
        Node::Cte(cte) => walk(Node::Query(&cte.query), visit),
        Node::Body(body) => match body {
            Body::Core(core) => walk(Node::Core(core), visit),
            Body::SetOperation(operation) => {
                walk(Node::Body(&operation.left), visit)?;
                walk(Node::Body(&operation.right), visit)
            }
            Body::Nested(query) => walk(Node::Query(query), visit),
            Body::Values(values) => {
                for row in &values.rows {
                    walk_all(row, visit)?;
                }
                ControlFlow::Continue(())
            }
        },
        Node::Core(core) => {
            for item in &core.columns {
                walk(Node::SelectItem(item), visit)?;
            }
            if let Some(from) = &core.from {
                walk(Node::From(from), visit)?;
            }
            walk_opt(core.where_clause.as_ref(), visit)?;
            walk_all(&core.group_by, visit)?;
            walk_opt(core.having.as_ref(), visit)?;
            walk_opt(core.qualify.as_ref(), visit)?;
            walk_order_by(&core.order_by, visit)?;
            walk_opt(core.limit.as_ref(), visit)?;
            walk_opt(core.offset.as_ref(), visit)
        }
        Node::SelectItem(item) => match item {
            SelectItem::Expr { expr, .. } => walk(Node::Expr(expr), visit),
            SelectItem::Wildcard { .. } | SelectItem::QualifiedWildcard { .. } => {
                ControlFlow::Continue(())
            }
        },
        Node::From(from) => {
            walk(Node::TableRef(&from.source), visit)?;
            for join in &from.joins {
                walk(Node::Join(join), visit)?;
            }
            ControlFlow::Continue(())
        }
        Node::Join(join) => {
            walk(Node::TableRef(&join.table), visit)?;
            walk_opt(join.condition.as_ref(), visit)
        }
        Node::TableRef(table) => match table {
            TableRef::Named { .. } => ControlFlow::Continue(()),
            TableRef::Derived { subquery, .. } | TableRef::Lateral { subquery, .. } => {
                walk(Node::Query(subquery), visit)
            }
            TableRef::NestedJoin { from, .. } => walk(Node::From(from), visit),
        },
        Node::OrderBy(order_by) => walk(Node::Expr(&order_by.expr), visit),
        Node::Expr(expr) => walk_expr_children(expr, visit),
    }
}

fn walk_expr_children<'a, F>(expr: &'a Expr, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    match &expr.kind {
        ExprKind::Column(_)
        | ExprKind::Literal(_)
        | ExprKind::Star { .. }
        | ExprKind::Raw { .. } => ControlFlow::Continue(()),
        ExprKind::Unary { expr, .. }
        | ExprKind::Nested(expr)
        | ExprKind::Field { expr, .. } => walk(Node::Expr(expr), visit),
        ExprKind::Binary(binary) => {
            walk(Node::Expr(&binary.left), visit)?;
            walk(Node::Expr(&binary.right), visit)
        }
        ExprKind::Function(function) => {
            walk_all(&function.args, visit)?;
            walk_opt(function.filter.as_deref(), visit)?;
            if let Some(window) = &function.over {
                walk_all(&window.partition_by, visit)?;
                walk_order_by(&window.order_by, visit)?;
            }
            ControlFlow::Continue(())
        }
        ExprKind::Case(case) => {
            walk_opt(case.operand.as_deref(), visit)?;
            for branch in &case.branches {
                walk(Node::Expr(&branch.condition), visit)?;
                walk(Node::Expr(&branch.result), visit)?;
            }
            walk_opt(case.else_result.as_deref(), visit)
        }
        ExprKind::Cast { expr, .. }
        | ExprKind::IsNull { expr, .. }
        | ExprKind::IsBool { expr, .. } => walk(Node::Expr(expr), visit),
        ExprKind::InList { expr, list, .. } => {
            walk(Node::Expr(expr), visit)?;
            walk_all(list, visit)
        }
        ExprKind::InSubquery { expr, subquery, .. } => {
            walk(Node::Expr(expr), visit)?;
            walk(Node::Query(subquery), visit)
        }
        ExprKind::Between {
            expr, low, high, ..
        } => {
            walk(Node::Expr(expr), visit)?;
            walk(Node::Expr(low), visit)?;
            walk(Node::Expr(high), visit)
        }
        ExprKind::Like { expr, pattern, .. } => {
            walk(Node::Expr(expr), visit)?;
            walk(Node::Expr(pattern), visit)
        }
        ExprKind::Subquery(query) | ExprKind::Exists { subquery: query, .. } => {
            walk(Node::Query(query), visit)
        }
        ExprKind::Index { expr, index } => {
            walk(Node::Expr(expr), visit)?;
            walk(Node::Expr(index), visit)
        }
        ExprKind::Slice { expr, lower, upper } => {
            walk(Node::Expr(expr), visit)?;
            walk_opt(lower.as_deref(), visit)?;
            walk_opt(upper.as_deref(), visit)
        }
        ExprKind::List(items) => walk_all(items, visit),
        ExprKind::Struct(fields) => {
            for field in fields {
                walk(Node::Expr(&field.value), visit)?;
            }
            ControlFlow::Continue(())
        }
        ExprKind::Lambda { body, .. } => walk(Node::Expr(body), visit),
    }
}

fn walk_all<'a, F>(exprs: &'a [Expr], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    for expr in exprs {
        walk(Node::Expr(expr), visit)?;
    }
    ControlFlow::Continue(())
}

fn walk_opt<'a, F>(expr: Option<&'a Expr>, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    match expr {
        Some(expr) => walk(Node::Expr(expr), visit),
        None => ControlFlow::Continue(()),
    }
}

fn walk_order_by<'a, F>(order_by: &'a [ast::OrderByExpr], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Node<'a>) -> Visit,
{
    for item in order_by {
        walk(Node::OrderBy(item), visit)?;
    }
    ControlFlow::Continue(())
}
