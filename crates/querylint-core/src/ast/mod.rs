//! Typed query tree consumed by lint rules.
//!
//! The tree is owned top-down with no back-edges and is never mutated during
//! analysis. It is produced from `sqlparser`'s AST by [`lower`]; rules only
//! ever see these types.
//!
//! Every node type added here must also be handled by
//! [`crate::linter::visit::walk`], which matches exhaustively on purpose.

pub mod lower;

use std::fmt;

use crate::types::Span;

/// An identifier exactly as written, plus whether it was quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub value: String,
    pub quoted: bool,
    pub span: Span,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
            span: Span::empty(),
        }
    }

    /// Case-insensitive comparison against a bare name.
    pub fn matches(&self, name: &str) -> bool {
        self.value.eq_ignore_ascii_case(name)
    }

    /// Key used for case-insensitive set membership.
    pub fn normalized(&self) -> String {
        self.value.to_ascii_lowercase()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A possibly qualified object name such as `db.schema.table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// The last name part (the table name for `schema.table`).
    pub fn base(&self) -> Option<&Ident> {
        self.0.last()
    }

    pub fn span(&self) -> Span {
        self.0
            .iter()
            .fold(Span::empty(), |span, part| span.union(&part.span))
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(&part.value)?;
        }
        Ok(())
    }
}

/// Root of a parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query(Box<Query>),
    /// `INSERT INTO ... [query]`
    Insert {
        source: Option<Box<Query>>,
        span: Span,
    },
    /// `CREATE VIEW name AS query`
    CreateView {
        name: ObjectName,
        query: Box<Query>,
        span: Span,
    },
    /// `CREATE TABLE name AS query`
    CreateTableAs {
        name: ObjectName,
        query: Box<Query>,
        span: Span,
    },
    /// Any statement without a query the rules could inspect.
    Other { kind: String, span: Span },
}

impl Statement {
    /// The query embedded in this statement, if any.
    pub fn query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(&**query),
            Self::Insert { source, .. } => source.as_deref(),
            Self::CreateView { query, .. } | Self::CreateTableAs { query, .. } => Some(&**query),
            Self::Other { .. } => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Query(query) => query.span,
            Self::Insert { span, .. }
            | Self::CreateView { span, .. }
            | Self::CreateTableAs { span, .. }
            | Self::Other { span, .. } => *span,
        }
    }
}

/// A query: optional CTEs plus a body.
///
/// `order_by`, `limit` and `offset` are only populated when the body is a
/// compound set operation; for a single SELECT they live on the [`Core`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub ctes: Vec<Cte>,
    pub recursive: bool,
    pub body: Body,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
    pub span: Span,
}

impl Query {
    /// Wraps a single core as a query.
    pub fn from_core(core: Core) -> Self {
        let span = core.span;
        Self {
            ctes: Vec::new(),
            recursive: false,
            body: Body::Core(Box::new(core)),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            span,
        }
    }
}

/// A named common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: Ident,
    pub query: Query,
    pub span: Span,
}

/// Set-operation structure combining cores.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Core(Box<Core>),
    SetOperation(Box<SetOperation>),
    /// A parenthesized query used as a body, e.g. a set-operation operand.
    Nested(Box<Query>),
    /// `VALUES (...), (...)`
    Values(Values),
}

impl Body {
    pub fn span(&self) -> Span {
        match self {
            Self::Core(core) => core.span,
            Self::SetOperation(operation) => operation.span,
            Self::Nested(query) => query.span,
            Self::Values(values) => values.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub op: SetOperator,
    pub quantifier: SetQuantifier,
    pub left: Body,
    pub right: Body,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        })
    }
}

/// Duplicate handling of a set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    /// No `ALL`/`DISTINCT` keyword written
    Implicit,
    All,
    Distinct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
    pub span: Span,
}

/// A single non-compound SELECT.
#[derive(Debug, Clone, PartialEq)]
pub struct Core {
    pub distinct: bool,
    pub columns: Vec<SelectItem>,
    pub from: Option<From>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub qualify: Option<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
    pub span: Span,
}

impl Core {
    /// Source table plus every joined table, in source order. Tables inside
    /// parenthesized joins follow the nested join itself.
    pub fn table_refs(&self) -> impl Iterator<Item = &TableRef> {
        self.from.iter().flat_map(From::table_refs)
    }

    pub fn joins(&self) -> &[Join] {
        self.from.as_ref().map_or(&[], |from| from.joins.as_slice())
    }

    pub fn has_star(&self) -> bool {
        self.columns.iter().any(SelectItem::is_star)
    }
}

/// One output column of a core.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Expr { expr: Expr, alias: Option<Ident> },
    /// `*`
    Wildcard { span: Span },
    /// `t.*`
    QualifiedWildcard { qualifier: ObjectName, span: Span },
}

impl SelectItem {
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Wildcard { .. } | Self::QualifiedWildcard { .. })
    }

    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Self::Expr { expr, .. } => Some(expr),
            Self::Wildcard { .. } | Self::QualifiedWildcard { .. } => None,
        }
    }

    pub fn alias(&self) -> Option<&Ident> {
        match self {
            Self::Expr { alias, .. } => alias.as_ref(),
            Self::Wildcard { .. } | Self::QualifiedWildcard { .. } => None,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Expr { expr, alias } => alias
                .as_ref()
                .map_or(expr.span, |alias| expr.span.union(&alias.span)),
            Self::Wildcard { span } | Self::QualifiedWildcard { span, .. } => *span,
        }
    }
}

/// A FROM clause: one source followed by its joins.
#[derive(Debug, Clone, PartialEq)]
pub struct From {
    pub source: TableRef,
    pub joins: Vec<Join>,
}

impl From {
    pub fn table_refs(&self) -> Vec<&TableRef> {
        let mut tables = Vec::new();
        let direct = std::iter::once(&self.source).chain(self.joins.iter().map(|join| &join.table));
        for table in direct {
            tables.push(table);
            if let TableRef::NestedJoin { from, .. } = table {
                tables.extend(from.table_refs());
            }
        }
        tables
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub natural: bool,
    pub table: TableRef,
    pub condition: Option<Expr>,
    pub using: Vec<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Bare `JOIN` with no type keyword
    Plain,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Semi,
    Anti,
    /// `CROSS APPLY` / `OUTER APPLY`
    Apply,
    /// Comma-separated FROM item
    Implicit,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Plain => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Semi => "SEMI JOIN",
            Self::Anti => "ANTI JOIN",
            Self::Apply => "APPLY",
            Self::Implicit => ",",
        }
    }
}

/// A table reference in FROM or JOIN.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    Named {
        name: ObjectName,
        alias: Option<Ident>,
        span: Span,
    },
    Derived {
        subquery: Box<Query>,
        alias: Option<Ident>,
        span: Span,
    },
    Lateral {
        subquery: Box<Query>,
        alias: Option<Ident>,
        span: Span,
    },
    /// Parenthesized join such as `(a JOIN b ON ...)`, possibly aliased.
    NestedJoin {
        from: Box<From>,
        alias: Option<Ident>,
        span: Span,
    },
}

impl TableRef {
    pub fn alias(&self) -> Option<&Ident> {
        match self {
            Self::Named { alias, .. }
            | Self::Derived { alias, .. }
            | Self::Lateral { alias, .. }
            | Self::NestedJoin { alias, .. } => alias.as_ref(),
        }
    }

    /// The name other clauses use to refer to this table: the alias if
    /// present, else the bare table name. Unaliased subqueries have none.
    pub fn reference_name(&self) -> Option<&Ident> {
        self.alias().or(match self {
            Self::Named { name, .. } => name.base(),
            Self::Derived { .. } | Self::Lateral { .. } | Self::NestedJoin { .. } => None,
        })
    }

    pub fn subquery(&self) -> Option<&Query> {
        match self {
            Self::Named { .. } | Self::NestedJoin { .. } => None,
            Self::Derived { subquery, .. } | Self::Lateral { subquery, .. } => Some(&**subquery),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Named { span, .. }
            | Self::Derived { span, .. }
            | Self::Lateral { span, .. }
            | Self::NestedJoin { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    /// `Some(true)` for explicit ASC, `Some(false)` for DESC
    pub asc: Option<bool>,
    pub nulls_first: Option<bool>,
}

/// An expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Strips any number of enclosing parentheses.
    pub fn unnested(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Nested(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    pub fn as_column(&self) -> Option<&ColumnRef> {
        match &self.kind {
            ExprKind::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            ExprKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_null_literal(&self) -> bool {
        self.as_literal()
            .is_some_and(|literal| literal.kind == LiteralKind::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Column(ColumnRef),
    Literal(Literal),
    Unary {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    Binary(BinaryExpr),
    Function(FunctionCall),
    Case(CaseExpr),
    Cast {
        expr: Box<Expr>,
        data_type: String,
        style: CastStyle,
    },
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    /// `IS [NOT] TRUE` / `IS [NOT] FALSE`
    IsBool {
        expr: Box<Expr>,
        value: bool,
        negated: bool,
    },
    Like {
        expr: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
        case_insensitive: bool,
    },
    Nested(Box<Expr>),
    Subquery(Box<Query>),
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    Index {
        expr: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        expr: Box<Expr>,
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
    },
    /// Array or tuple literal
    List(Vec<Expr>),
    Struct(Vec<StructField>),
    Lambda {
        params: Vec<Ident>,
        body: Box<Expr>,
    },
    /// Dotted field access on a composite value, e.g. `(rec).name`
    Field {
        expr: Box<Expr>,
        field: Ident,
    },
    /// `*` or `t.*` in expression position, e.g. `COUNT(*)`
    Star {
        qualifier: Option<ObjectName>,
    },
    /// Dialect-specific form kept as SQL text.
    Raw {
        sql: String,
    },
}

/// A column reference such as `col`, `t.col` or `schema.t.col`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub qualifier: Vec<Ident>,
    pub name: Ident,
}

impl ColumnRef {
    pub fn is_qualified(&self) -> bool {
        !self.qualifier.is_empty()
    }

    /// The part of the qualifier naming a table (`t` in `schema.t.col`).
    pub fn table(&self) -> Option<&Ident> {
        self.qualifier.last()
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.qualifier {
            write!(f, "{}.", part.value)?;
        }
        f.write_str(&self.name.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Literal text without quotes
    pub value: String,
}

impl Literal {
    /// Returns the boolean value for `TRUE`/`FALSE` literals.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            LiteralKind::Boolean => Some(self.value.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
    Null,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: BinaryOperator,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Concat,
    Other(String),
}

impl BinaryOperator {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: ObjectName,
    pub args: Vec<Expr>,
    pub distinct: bool,
    pub filter: Option<Box<Expr>>,
    pub over: Option<WindowSpec>,
}

impl FunctionCall {
    /// Case-insensitive match against the unqualified function name.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.base().is_some_and(|base| base.matches(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    /// `OVER w` or `OVER (w ...)`
    pub name: Option<Ident>,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub operand: Option<Box<Expr>>,
    pub branches: Vec<CaseBranch>,
    pub else_result: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastStyle {
    /// `CAST(x AS t)`
    Cast,
    /// `TRY_CAST(x AS t)`
    TryCast,
    /// `SAFE_CAST(x AS t)`
    SafeCast,
    /// `x::t`
    DoubleColon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: Option<Ident>,
    pub value: Expr,
}
