//! Typed collectors built on [`walk`].
//!
//! Rules ask for "every X under this node" instead of writing their own
//! recursion. [`collect`] and [`find_first`] are generic over any type that
//! implements [`FromNode`]; the named helpers are thin specializations.

use std::ops::Deref;

use super::visit::{walk, Node, Visit};
use crate::ast::{
    BinaryExpr, Body, CaseExpr, ColumnRef, Core, Cte, Expr, ExprKind, FunctionCall, Ident, Join,
    Query, SetOperation, Statement, TableRef,
};
use crate::types::Span;

/// Extraction of a typed view from a traversal node.
pub trait FromNode<'a>: Sized {
    fn from_node(node: Node<'a>) -> Option<Self>;
}

/// An expression payload paired with the span of the expression holding it.
#[derive(Debug, Clone, Copy)]
pub struct Located<'a, T> {
    pub node: &'a T,
    pub span: Span,
}

impl<T> Deref for Located<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

impl<'a> FromNode<'a> for Node<'a> {
    fn from_node(node: Node<'a>) -> Option<Self> {
        Some(node)
    }
}

macro_rules! node_ref {
    ($ty:ty, $variant:ident) => {
        impl<'a> FromNode<'a> for &'a $ty {
            fn from_node(node: Node<'a>) -> Option<Self> {
                match node {
                    Node::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

node_ref!(Query, Query);
node_ref!(Cte, Cte);
node_ref!(Body, Body);
node_ref!(Core, Core);
node_ref!(Join, Join);
node_ref!(TableRef, TableRef);
node_ref!(Expr, Expr);

macro_rules! located_expr {
    ($ty:ty, $pattern:ident) => {
        impl<'a> FromNode<'a> for Located<'a, $ty> {
            fn from_node(node: Node<'a>) -> Option<Self> {
                match node {
                    Node::Expr(Expr {
                        kind: ExprKind::$pattern(inner),
                        span,
                    }) => Some(Located {
                        node: inner,
                        span: *span,
                    }),
                    _ => None,
                }
            }
        }
    };
}

located_expr!(FunctionCall, Function);
located_expr!(ColumnRef, Column);
located_expr!(CaseExpr, Case);
located_expr!(BinaryExpr, Binary);

/// Every node under `root` (inclusive) convertible to `T`, in walk order.
pub fn collect<'a, T: FromNode<'a>>(root: Node<'a>) -> Vec<T> {
    let mut found = Vec::new();
    let _ = walk(root, &mut |node| {
        if let Some(item) = T::from_node(node) {
            found.push(item);
        }
        Visit::Continue
    });
    found
}

/// The first node under `root` convertible to `T` that satisfies
/// `predicate`. Stops the walk as soon as it is found.
pub fn find_first<'a, T, P>(root: Node<'a>, mut predicate: P) -> Option<T>
where
    T: FromNode<'a>,
    P: FnMut(&T) -> bool,
{
    let mut found = None;
    let _ = walk(root, &mut |node| match T::from_node(node) {
        Some(item) if predicate(&item) => {
            found = Some(item);
            Visit::Stop
        }
        _ => Visit::Continue,
    });
    found
}

pub fn functions(root: Node<'_>) -> Vec<Located<'_, FunctionCall>> {
    collect(root)
}

pub fn column_refs(root: Node<'_>) -> Vec<Located<'_, ColumnRef>> {
    collect(root)
}

pub fn table_refs(root: Node<'_>) -> Vec<&TableRef> {
    collect(root)
}

pub fn case_exprs(root: Node<'_>) -> Vec<Located<'_, CaseExpr>> {
    collect(root)
}

pub fn binary_exprs(root: Node<'_>) -> Vec<Located<'_, BinaryExpr>> {
    collect(root)
}

pub fn joins(root: Node<'_>) -> Vec<&Join> {
    collect(root)
}

pub fn cores(root: Node<'_>) -> Vec<&Core> {
    collect(root)
}

pub fn queries(root: Node<'_>) -> Vec<&Query> {
    collect(root)
}

/// Every set-operation node under `root`, outermost first.
pub fn set_operations(root: Node<'_>) -> Vec<&SetOperation> {
    collect::<&Body>(root)
        .into_iter()
        .filter_map(|body| match body {
            Body::SetOperation(operation) => Some(&**operation),
            _ => None,
        })
        .collect()
}

/// Terminal operands of the set-operation chain rooted at `body`, in source
/// order. Parenthesized operands are flattened into the chain.
pub fn set_operation_branches(body: &Body) -> Vec<&Body> {
    fn flatten<'a>(body: &'a Body, branches: &mut Vec<&'a Body>) {
        match body {
            Body::SetOperation(operation) => {
                flatten(&operation.left, branches);
                flatten(&operation.right, branches);
            }
            Body::Nested(query) => flatten(&query.body, branches),
            Body::Core(_) | Body::Values(_) => branches.push(body),
        }
    }

    let mut branches = Vec::new();
    flatten(body, &mut branches);
    branches
}

/// The cores among [`set_operation_branches`].
pub fn set_operation_cores(body: &Body) -> Vec<&Core> {
    set_operation_branches(body)
        .into_iter()
        .filter_map(|branch| match branch {
            Body::Core(core) => Some(&**core),
            _ => None,
        })
        .collect()
}

/// Names of every CTE defined anywhere under `root`.
pub fn cte_names(root: Node<'_>) -> Vec<&Ident> {
    collect::<&Cte>(root)
        .into_iter()
        .map(|cte| &cte.name)
        .collect()
}

/// The left-most core of the statement's top-level body.
///
/// Returns `None` for statements without a query and for bodies that bottom
/// out in `VALUES`.
pub fn primary_core(statement: &Statement) -> Option<&Core> {
    let mut body = &statement.query()?.body;
    loop {
        match body {
            Body::Core(core) => return Some(&**core),
            Body::SetOperation(operation) => body = &operation.left,
            Body::Nested(query) => body = &query.body,
            Body::Values(_) => return None,
        }
    }
}

/// The name each table reference under `root` is known by: its alias if
/// present, else its bare table name. Unaliased subqueries contribute none.
pub fn referenced_table_aliases(root: Node<'_>) -> Vec<&Ident> {
    table_refs(root)
        .into_iter()
        .filter_map(TableRef::reference_name)
        .collect()
}

/// Column references belonging to one core, without descending into
/// subqueries, derived tables or CTEs.
pub fn core_scope_columns(core: &Core) -> Vec<Located<'_, ColumnRef>> {
    let mut found = Vec::new();
    let _ = walk(Node::Core(core), &mut |node| match node {
        Node::Query(_) => Visit::Skip,
        Node::Expr(Expr {
            kind: ExprKind::Column(column),
            span,
        }) => {
            found.push(Located {
                node: column,
                span: *span,
            });
            Visit::Continue
        }
        _ => Visit::Continue,
    });
    found
}
