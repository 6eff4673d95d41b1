//! Lowering from `sqlparser`'s AST into the lint node model.
//!
//! Lowering is total: constructs without a counterpart become
//! [`ExprKind::Raw`], a text-named [`TableRef::Named`], or
//! [`Statement::Other`]. It never fails. Keyword forms that carry operands
//! (`EXTRACT`, `TRIM`, `= ANY (...)` and the like) are lowered to function
//! calls or binary expressions so their columns and subqueries stay
//! reachable.

use sqlparser::ast::{self as sql, Spanned};

use super::*;

/// Lowers one parsed statement.
pub fn lower_statement(statement: &sql::Statement) -> Statement {
    let span = statement.span().into();
    match statement {
        sql::Statement::Query(query) => Statement::Query(Box::new(lower_query(query))),
        sql::Statement::Insert(insert) => Statement::Insert {
            source: insert
                .source
                .as_ref()
                .map(|source| Box::new(lower_query(source))),
            span,
        },
        sql::Statement::CreateView { name, query, .. } => Statement::CreateView {
            name: lower_object_name(name),
            query: Box::new(lower_query(query)),
            span,
        },
        sql::Statement::CreateTable(create) => match &create.query {
            Some(query) => Statement::CreateTableAs {
                name: lower_object_name(&create.name),
                query: Box::new(lower_query(query)),
                span,
            },
            None => Statement::Other {
                kind: "CREATE TABLE".to_string(),
                span,
            },
        },
        other => Statement::Other {
            kind: statement_kind(other),
            span,
        },
    }
}

/// Leading keywords of a statement, used only for display.
fn statement_kind(statement: &sql::Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

pub fn lower_query(query: &sql::Query) -> Query {
    let (ctes, recursive) = match &query.with {
        Some(with) => (
            with.cte_tables.iter().map(lower_cte).collect(),
            with.recursive,
        ),
        None => (Vec::new(), false),
    };

    let mut body = lower_set_expr(&query.body);
    let mut order_by = query
        .order_by
        .as_ref()
        .map(lower_order_by)
        .unwrap_or_default();
    let (mut limit, mut offset) = lower_limit_clause(query.limit_clause.as_ref());

    if let Body::Core(core) = &mut body {
        core.order_by = std::mem::take(&mut order_by);
        core.limit = limit.take();
        core.offset = offset.take();
    }

    Query {
        ctes,
        recursive,
        body,
        order_by,
        limit,
        offset,
        span: query.span().into(),
    }
}

fn lower_cte(cte: &sql::Cte) -> Cte {
    Cte {
        name: lower_ident(&cte.alias.name),
        query: lower_query(&cte.query),
        span: cte.span().into(),
    }
}

fn lower_order_by(order_by: &sql::OrderBy) -> Vec<OrderByExpr> {
    match &order_by.kind {
        sql::OrderByKind::Expressions(exprs) => exprs.iter().map(lower_order_by_expr).collect(),
        sql::OrderByKind::All(_) => Vec::new(),
    }
}

fn lower_order_by_expr(expr: &sql::OrderByExpr) -> OrderByExpr {
    OrderByExpr {
        expr: lower_expr(&expr.expr),
        asc: expr.options.asc,
        nulls_first: expr.options.nulls_first,
    }
}

fn lower_limit_clause(clause: Option<&sql::LimitClause>) -> (Option<Expr>, Option<Expr>) {
    match clause {
        Some(sql::LimitClause::LimitOffset { limit, offset, .. }) => (
            limit.as_ref().map(lower_expr),
            offset.as_ref().map(|offset| lower_expr(&offset.value)),
        ),
        Some(sql::LimitClause::OffsetCommaLimit { offset, limit }) => {
            (Some(lower_expr(limit)), Some(lower_expr(offset)))
        }
        None => (None, None),
    }
}

fn lower_set_expr(set_expr: &sql::SetExpr) -> Body {
    match set_expr {
        sql::SetExpr::Select(select) => Body::Core(Box::new(lower_select(select))),
        sql::SetExpr::Query(query) => Body::Nested(Box::new(lower_query(query))),
        sql::SetExpr::SetOperation {
            op,
            set_quantifier,
            left,
            right,
        } => Body::SetOperation(Box::new(SetOperation {
            op: match op {
                sql::SetOperator::Union => SetOperator::Union,
                sql::SetOperator::Intersect => SetOperator::Intersect,
                sql::SetOperator::Except | sql::SetOperator::Minus => SetOperator::Except,
            },
            quantifier: match set_quantifier {
                sql::SetQuantifier::None => SetQuantifier::Implicit,
                sql::SetQuantifier::All | sql::SetQuantifier::AllByName => SetQuantifier::All,
                sql::SetQuantifier::Distinct | sql::SetQuantifier::DistinctByName => {
                    SetQuantifier::Distinct
                }
                _ => SetQuantifier::Implicit,
            },
            left: lower_set_expr(left),
            right: lower_set_expr(right),
            span: set_expr.span().into(),
        })),
        sql::SetExpr::Values(values) => Body::Values(Values {
            rows: values
                .rows
                .iter()
                .map(|row| row.iter().map(lower_expr).collect())
                .collect(),
            span: set_expr.span().into(),
        }),
        // TABLE t, and DML used as a query body: the output shape is unknown,
        // so it is modeled as a single-star core.
        other => {
            let span: Span = other.span().into();
            Body::Core(Box::new(Core {
                distinct: false,
                columns: vec![SelectItem::Wildcard { span }],
                from: None,
                where_clause: None,
                group_by: Vec::new(),
                having: None,
                qualify: None,
                order_by: Vec::new(),
                limit: None,
                offset: None,
                span,
            }))
        }
    }
}

fn lower_select(select: &sql::Select) -> Core {
    let group_by = match &select.group_by {
        sql::GroupByExpr::Expressions(exprs, _) => exprs.iter().map(lower_expr).collect(),
        sql::GroupByExpr::All(_) => Vec::new(),
    };

    Core {
        distinct: matches!(select.distinct, Some(sql::Distinct::Distinct)),
        columns: select.projection.iter().map(lower_select_item).collect(),
        from: lower_from(&select.from),
        where_clause: select.selection.as_ref().map(lower_expr),
        group_by,
        having: select.having.as_ref().map(lower_expr),
        qualify: select.qualify.as_ref().map(lower_expr),
        order_by: Vec::new(),
        limit: None,
        offset: None,
        span: select.span().into(),
    }
}

fn lower_select_item(item: &sql::SelectItem) -> SelectItem {
    match item {
        sql::SelectItem::UnnamedExpr(expr) => SelectItem::Expr {
            expr: lower_expr(expr),
            alias: None,
        },
        sql::SelectItem::ExprWithAlias { expr, alias } => SelectItem::Expr {
            expr: lower_expr(expr),
            alias: Some(lower_ident(alias)),
        },
        sql::SelectItem::QualifiedWildcard(kind, _) => {
            let span = item.span().into();
            match kind {
                sql::SelectItemQualifiedWildcardKind::ObjectName(name) => {
                    SelectItem::QualifiedWildcard {
                        qualifier: lower_object_name(name),
                        span,
                    }
                }
                sql::SelectItemQualifiedWildcardKind::Expr(expr) => SelectItem::Expr {
                    expr: Expr::new(
                        ExprKind::Raw {
                            sql: format!("{expr}.*"),
                        },
                        span,
                    ),
                    alias: None,
                },
            }
        }
        sql::SelectItem::Wildcard(_) => SelectItem::Wildcard {
            span: item.span().into(),
        },
    }
}

fn lower_from(from: &[sql::TableWithJoins]) -> Option<From> {
    let (first, rest) = from.split_first()?;

    let (source, mut joins) = lower_table_with_joins(first);
    for item in rest {
        let span = item.relation.span().into();
        let (table, item_joins) = lower_table_with_joins(item);
        joins.push(Join {
            kind: JoinKind::Implicit,
            natural: false,
            table,
            condition: None,
            using: Vec::new(),
            span,
        });
        joins.extend(item_joins);
    }

    Some(From { source, joins })
}

fn lower_table_with_joins(table: &sql::TableWithJoins) -> (TableRef, Vec<Join>) {
    // An unaliased parenthesized join in source position reads the same as
    // the flat join list.
    if let sql::TableFactor::NestedJoin {
        table_with_joins,
        alias: None,
    } = &table.relation
    {
        let (source, mut joins) = lower_table_with_joins(table_with_joins);
        joins.extend(table.joins.iter().map(lower_join));
        return (source, joins);
    }

    (
        lower_table_factor(&table.relation),
        table.joins.iter().map(lower_join).collect(),
    )
}

fn lower_join(join: &sql::Join) -> Join {
    use sql::JoinOperator as Op;

    let (kind, constraint) = match &join.join_operator {
        Op::Join(constraint) => (JoinKind::Plain, Some(constraint)),
        Op::Inner(constraint) | Op::StraightJoin(constraint) => (JoinKind::Inner, Some(constraint)),
        Op::Left(constraint) | Op::LeftOuter(constraint) => (JoinKind::Left, Some(constraint)),
        Op::Right(constraint) | Op::RightOuter(constraint) => (JoinKind::Right, Some(constraint)),
        Op::FullOuter(constraint) => (JoinKind::Full, Some(constraint)),
        Op::CrossJoin(constraint) => (JoinKind::Cross, Some(constraint)),
        Op::Semi(constraint) | Op::LeftSemi(constraint) | Op::RightSemi(constraint) => {
            (JoinKind::Semi, Some(constraint))
        }
        Op::Anti(constraint) | Op::LeftAnti(constraint) | Op::RightAnti(constraint) => {
            (JoinKind::Anti, Some(constraint))
        }
        Op::AsOf { constraint, .. } => (JoinKind::Inner, Some(constraint)),
        Op::CrossApply | Op::OuterApply => (JoinKind::Apply, None),
    };

    let mut lowered = Join {
        kind,
        natural: false,
        table: lower_table_factor(&join.relation),
        condition: None,
        using: Vec::new(),
        span: join.span().into(),
    };

    match constraint {
        Some(sql::JoinConstraint::On(expr)) => lowered.condition = Some(lower_expr(expr)),
        Some(sql::JoinConstraint::Using(columns)) => {
            lowered.using = columns
                .iter()
                .map(|column| match column.0.last().and_then(|part| part.as_ident()) {
                    Some(ident) => lower_ident(ident),
                    None => Ident::new(column.to_string()),
                })
                .collect();
        }
        Some(sql::JoinConstraint::Natural) => lowered.natural = true,
        Some(sql::JoinConstraint::None) | None => {}
    }

    lowered
}

fn lower_table_factor(factor: &sql::TableFactor) -> TableRef {
    let span = factor.span().into();
    match factor {
        sql::TableFactor::Table { name, alias, .. } => TableRef::Named {
            name: lower_object_name(name),
            alias: alias.as_ref().map(|alias| lower_ident(&alias.name)),
            span,
        },
        sql::TableFactor::Derived {
            lateral,
            subquery,
            alias,
        } => {
            let subquery = Box::new(lower_query(subquery));
            let alias = alias.as_ref().map(|alias| lower_ident(&alias.name));
            if *lateral {
                TableRef::Lateral {
                    subquery,
                    alias,
                    span,
                }
            } else {
                TableRef::Derived {
                    subquery,
                    alias,
                    span,
                }
            }
        }
        sql::TableFactor::NestedJoin {
            table_with_joins,
            alias,
        } => {
            let (source, joins) = lower_table_with_joins(table_with_joins);
            TableRef::NestedJoin {
                from: Box::new(From { source, joins }),
                alias: alias.as_ref().map(|alias| lower_ident(&alias.name)),
                span,
            }
        }
        other => {
            // Table functions, UNNEST, PIVOT and friends keep their SQL text
            // as the name so alias checks still see them.
            let alias = other_factor_alias(other);
            let text = match alias {
                Some(_) => strip_alias(&other.to_string()),
                None => other.to_string(),
            };
            TableRef::Named {
                name: ObjectName(vec![Ident {
                    value: text,
                    quoted: false,
                    span,
                }]),
                alias: alias.map(lower_ident),
                span,
            }
        }
    }
}

fn other_factor_alias(factor: &sql::TableFactor) -> Option<&sql::Ident> {
    let alias = match factor {
        sql::TableFactor::TableFunction { alias, .. }
        | sql::TableFactor::Function { alias, .. }
        | sql::TableFactor::UNNEST { alias, .. }
        | sql::TableFactor::JsonTable { alias, .. }
        | sql::TableFactor::OpenJsonTable { alias, .. }
        | sql::TableFactor::Pivot { alias, .. }
        | sql::TableFactor::Unpivot { alias, .. }
        | sql::TableFactor::MatchRecognize { alias, .. } => alias.as_ref(),
        _ => None,
    };
    alias.map(|alias| &alias.name)
}

/// Drops a trailing ` AS alias` from rendered SQL.
fn strip_alias(text: &str) -> String {
    match text.rfind(" AS ") {
        Some(index) => text[..index].to_string(),
        None => text.to_string(),
    }
}

fn lower_ident(ident: &sql::Ident) -> Ident {
    Ident {
        value: ident.value.clone(),
        quoted: ident.quote_style.is_some(),
        span: ident.span.into(),
    }
}

fn lower_object_name(name: &sql::ObjectName) -> ObjectName {
    ObjectName(
        name.0
            .iter()
            .map(|part| match part.as_ident() {
                Some(ident) => lower_ident(ident),
                None => Ident::new(part.to_string()),
            })
            .collect(),
    )
}

fn boxed(expr: &sql::Expr) -> Box<Expr> {
    Box::new(lower_expr(expr))
}

fn raw(expr: &sql::Expr, span: Span) -> Expr {
    Expr::new(
        ExprKind::Raw {
            sql: expr.to_string(),
        },
        span,
    )
}

pub fn lower_expr(expr: &sql::Expr) -> Expr {
    let span: Span = expr.span().into();
    let kind = match expr {
        sql::Expr::Identifier(ident) => ExprKind::Column(ColumnRef {
            qualifier: Vec::new(),
            name: lower_ident(ident),
        }),
        sql::Expr::CompoundIdentifier(parts) => match parts.split_last() {
            Some((name, qualifier)) => ExprKind::Column(ColumnRef {
                qualifier: qualifier.iter().map(lower_ident).collect(),
                name: lower_ident(name),
            }),
            None => return raw(expr, span),
        },
        sql::Expr::Value(value) => ExprKind::Literal(lower_value(&value.value)),
        sql::Expr::UnaryOp { op, expr: inner } => ExprKind::Unary {
            op: match op {
                sql::UnaryOperator::Not => UnaryOperator::Not,
                sql::UnaryOperator::Minus => UnaryOperator::Minus,
                sql::UnaryOperator::Plus => UnaryOperator::Plus,
                other => UnaryOperator::Other(other.to_string()),
            },
            expr: boxed(inner),
        },
        sql::Expr::BinaryOp { left, op, right } => ExprKind::Binary(BinaryExpr {
            left: boxed(left),
            op: lower_binary_operator(op),
            right: boxed(right),
        }),
        sql::Expr::IsDistinctFrom(left, right) => ExprKind::Binary(BinaryExpr {
            left: boxed(left),
            op: BinaryOperator::Other("IS DISTINCT FROM".to_string()),
            right: boxed(right),
        }),
        sql::Expr::IsNotDistinctFrom(left, right) => ExprKind::Binary(BinaryExpr {
            left: boxed(left),
            op: BinaryOperator::Other("IS NOT DISTINCT FROM".to_string()),
            right: boxed(right),
        }),
        sql::Expr::Function(function) => ExprKind::Function(lower_function(function, span)),
        sql::Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => ExprKind::Case(CaseExpr {
            operand: operand.as_deref().map(boxed),
            branches: conditions
                .iter()
                .map(|when| CaseBranch {
                    condition: lower_expr(&when.condition),
                    result: lower_expr(&when.result),
                })
                .collect(),
            else_result: else_result.as_deref().map(boxed),
        }),
        sql::Expr::Cast {
            kind,
            expr: inner,
            data_type,
            ..
        } => ExprKind::Cast {
            expr: boxed(inner),
            data_type: data_type.to_string(),
            style: match kind {
                sql::CastKind::Cast => CastStyle::Cast,
                sql::CastKind::TryCast => CastStyle::TryCast,
                sql::CastKind::SafeCast => CastStyle::SafeCast,
                sql::CastKind::DoubleColon => CastStyle::DoubleColon,
            },
        },
        sql::Expr::InList {
            expr: inner,
            list,
            negated,
        } => ExprKind::InList {
            expr: boxed(inner),
            list: list.iter().map(lower_expr).collect(),
            negated: *negated,
        },
        sql::Expr::InSubquery {
            expr: inner,
            subquery,
            negated,
        } => ExprKind::InSubquery {
            expr: boxed(inner),
            subquery: Box::new(lower_query(subquery)),
            negated: *negated,
        },
        sql::Expr::Between {
            expr: inner,
            negated,
            low,
            high,
        } => ExprKind::Between {
            expr: boxed(inner),
            low: boxed(low),
            high: boxed(high),
            negated: *negated,
        },
        sql::Expr::IsNull(inner) => ExprKind::IsNull {
            expr: boxed(inner),
            negated: false,
        },
        sql::Expr::IsNotNull(inner) => ExprKind::IsNull {
            expr: boxed(inner),
            negated: true,
        },
        sql::Expr::IsTrue(inner) => is_bool(inner, true, false),
        sql::Expr::IsNotTrue(inner) => is_bool(inner, true, true),
        sql::Expr::IsFalse(inner) => is_bool(inner, false, false),
        sql::Expr::IsNotFalse(inner) => is_bool(inner, false, true),
        sql::Expr::Like {
            negated,
            expr: inner,
            pattern,
            ..
        } => ExprKind::Like {
            expr: boxed(inner),
            pattern: boxed(pattern),
            negated: *negated,
            case_insensitive: false,
        },
        sql::Expr::ILike {
            negated,
            expr: inner,
            pattern,
            ..
        } => ExprKind::Like {
            expr: boxed(inner),
            pattern: boxed(pattern),
            negated: *negated,
            case_insensitive: true,
        },
        sql::Expr::Nested(inner) => ExprKind::Nested(boxed(inner)),
        sql::Expr::Subquery(query) => ExprKind::Subquery(Box::new(lower_query(query))),
        sql::Expr::Exists { subquery, negated } => ExprKind::Exists {
            subquery: Box::new(lower_query(subquery)),
            negated: *negated,
        },
        sql::Expr::CompoundFieldAccess { root, access_chain } => {
            return lower_field_access(root, access_chain, span)
        }
        sql::Expr::Tuple(items) => ExprKind::List(items.iter().map(lower_expr).collect()),
        sql::Expr::Array(array) => ExprKind::List(array.elem.iter().map(lower_expr).collect()),
        sql::Expr::Struct { values, .. } => ExprKind::Struct(
            values
                .iter()
                .map(|value| match value {
                    sql::Expr::Named { expr: inner, name } => StructField {
                        name: Some(lower_ident(name)),
                        value: lower_expr(inner),
                    },
                    other => StructField {
                        name: None,
                        value: lower_expr(other),
                    },
                })
                .collect(),
        ),
        sql::Expr::Lambda(lambda) => ExprKind::Lambda {
            params: lambda.params.iter().map(lower_ident).collect(),
            body: boxed(&lambda.body),
        },
        sql::Expr::AnyOp {
            left,
            compare_op,
            right,
            is_some,
        } => {
            let quantifier = if *is_some { "SOME" } else { "ANY" };
            ExprKind::Binary(BinaryExpr {
                left: boxed(left),
                op: BinaryOperator::Other(format!("{compare_op} {quantifier}")),
                right: boxed(right),
            })
        }
        sql::Expr::AllOp {
            left,
            compare_op,
            right,
        } => ExprKind::Binary(BinaryExpr {
            left: boxed(left),
            op: BinaryOperator::Other(format!("{compare_op} ALL")),
            right: boxed(right),
        }),
        sql::Expr::SimilarTo {
            negated,
            expr: inner,
            pattern,
            ..
        } => ExprKind::Binary(BinaryExpr {
            left: boxed(inner),
            op: BinaryOperator::Other(negatable("SIMILAR TO", *negated)),
            right: boxed(pattern),
        }),
        sql::Expr::RLike {
            negated,
            expr: inner,
            pattern,
            regexp,
        } => ExprKind::Binary(BinaryExpr {
            left: boxed(inner),
            op: BinaryOperator::Other(negatable(
                if *regexp { "REGEXP" } else { "RLIKE" },
                *negated,
            )),
            right: boxed(pattern),
        }),
        sql::Expr::AtTimeZone {
            timestamp,
            time_zone,
        } => ExprKind::Binary(BinaryExpr {
            left: boxed(timestamp),
            op: BinaryOperator::Other("AT TIME ZONE".to_string()),
            right: boxed(time_zone),
        }),
        sql::Expr::InUnnest {
            expr: inner,
            array_expr,
            negated,
        } => ExprKind::InList {
            expr: boxed(inner),
            list: vec![Expr::new(
                keyword_call("UNNEST", vec![lower_expr(array_expr)]),
                array_expr.span().into(),
            )],
            negated: *negated,
        },
        sql::Expr::IsUnknown(inner) => ExprKind::Unary {
            op: UnaryOperator::Other("IS UNKNOWN".to_string()),
            expr: boxed(inner),
        },
        sql::Expr::IsNotUnknown(inner) => ExprKind::Unary {
            op: UnaryOperator::Other("IS NOT UNKNOWN".to_string()),
            expr: boxed(inner),
        },
        sql::Expr::OuterJoin(inner) => ExprKind::Unary {
            op: UnaryOperator::Other("(+)".to_string()),
            expr: boxed(inner),
        },
        sql::Expr::Prior(inner) => ExprKind::Unary {
            op: UnaryOperator::Other("PRIOR".to_string()),
            expr: boxed(inner),
        },
        sql::Expr::Extract { expr: inner, .. } => keyword_call("EXTRACT", vec![lower_expr(inner)]),
        sql::Expr::Ceil { expr: inner, field } => {
            keyword_call("CEIL", ceil_floor_args(inner, field))
        }
        sql::Expr::Floor { expr: inner, field } => {
            keyword_call("FLOOR", ceil_floor_args(inner, field))
        }
        sql::Expr::Position { expr: inner, r#in } => {
            keyword_call("POSITION", vec![lower_expr(inner), lower_expr(r#in)])
        }
        sql::Expr::Substring {
            expr: inner,
            substring_from,
            substring_for,
            ..
        } => {
            let mut args = vec![lower_expr(inner)];
            args.extend(substring_from.as_deref().map(lower_expr));
            args.extend(substring_for.as_deref().map(lower_expr));
            keyword_call("SUBSTRING", args)
        }
        sql::Expr::Trim {
            expr: inner,
            trim_what,
            trim_characters,
            ..
        } => {
            let mut args: Vec<Expr> = trim_what.as_deref().map(lower_expr).into_iter().collect();
            args.push(lower_expr(inner));
            args.extend(trim_characters.iter().flatten().map(lower_expr));
            keyword_call("TRIM", args)
        }
        sql::Expr::Overlay {
            expr: inner,
            overlay_what,
            overlay_from,
            overlay_for,
        } => {
            let mut args = vec![
                lower_expr(inner),
                lower_expr(overlay_what),
                lower_expr(overlay_from),
            ];
            args.extend(overlay_for.as_deref().map(lower_expr));
            keyword_call("OVERLAY", args)
        }
        sql::Expr::Convert {
            is_try,
            expr: inner,
            styles,
            ..
        } => {
            let mut args = vec![lower_expr(inner)];
            args.extend(styles.iter().map(lower_expr));
            keyword_call(if *is_try { "TRY_CONVERT" } else { "CONVERT" }, args)
        }
        sql::Expr::Collate { expr: inner, .. } => keyword_call("COLLATE", vec![lower_expr(inner)]),
        sql::Expr::Interval(interval) => {
            keyword_call("INTERVAL", vec![lower_expr(&interval.value)])
        }
        sql::Expr::GroupingSets(sets) => keyword_call("GROUPING SETS", grouping_args(sets, span)),
        sql::Expr::Cube(sets) => keyword_call("CUBE", grouping_args(sets, span)),
        sql::Expr::Rollup(sets) => keyword_call("ROLLUP", grouping_args(sets, span)),
        sql::Expr::JsonAccess { value, path } => ExprKind::Field {
            expr: boxed(value),
            field: Ident::new(path.to_string()),
        },
        sql::Expr::Named { expr: inner, .. } => return lower_expr(inner),
        sql::Expr::Wildcard(_) => ExprKind::Star { qualifier: None },
        sql::Expr::QualifiedWildcard(name, _) => ExprKind::Star {
            qualifier: Some(lower_object_name(name)),
        },
        _ => return raw(expr, span),
    };
    Expr::new(kind, span)
}

/// A keyword form such as `EXTRACT(... FROM x)` as a call over its operands.
fn keyword_call(name: &str, args: Vec<Expr>) -> ExprKind {
    ExprKind::Function(FunctionCall {
        name: ObjectName(vec![Ident::new(name)]),
        args,
        distinct: false,
        filter: None,
        over: None,
    })
}

fn negatable(op: &str, negated: bool) -> String {
    if negated {
        format!("NOT {op}")
    } else {
        op.to_string()
    }
}

fn ceil_floor_args(inner: &sql::Expr, field: &sql::CeilFloorKind) -> Vec<Expr> {
    let mut args = vec![lower_expr(inner)];
    if let sql::CeilFloorKind::Scale(scale) = field {
        args.push(Expr::new(ExprKind::Literal(lower_value(scale)), Span::empty()));
    }
    args
}

/// Each grouping set becomes one list argument.
fn grouping_args(sets: &[Vec<sql::Expr>], span: Span) -> Vec<Expr> {
    sets.iter()
        .map(|set| Expr::new(ExprKind::List(set.iter().map(lower_expr).collect()), span))
        .collect()
}

fn is_bool(inner: &sql::Expr, value: bool, negated: bool) -> ExprKind {
    ExprKind::IsBool {
        expr: boxed(inner),
        value,
        negated,
    }
}

/// `a[1]`, `a[1:2]`, `(rec).name` and chains of them.
fn lower_field_access(root: &sql::Expr, chain: &[sql::AccessExpr], span: Span) -> Expr {
    let mut current = lower_expr(root);
    for access in chain {
        let kind = match access {
            sql::AccessExpr::Subscript(sql::Subscript::Index { index }) => ExprKind::Index {
                expr: Box::new(current),
                index: boxed(index),
            },
            sql::AccessExpr::Subscript(sql::Subscript::Slice {
                lower_bound,
                upper_bound,
                ..
            }) => ExprKind::Slice {
                expr: Box::new(current),
                lower: lower_bound.as_ref().map(boxed),
                upper: upper_bound.as_ref().map(boxed),
            },
            sql::AccessExpr::Dot(field) => ExprKind::Field {
                expr: Box::new(current),
                field: match field {
                    sql::Expr::Identifier(ident) => lower_ident(ident),
                    other => Ident::new(other.to_string()),
                },
            },
        };
        current = Expr::new(kind, span);
    }
    current
}

fn lower_function(function: &sql::Function, span: Span) -> FunctionCall {
    let (args, distinct) = match &function.args {
        sql::FunctionArguments::None => (Vec::new(), false),
        sql::FunctionArguments::Subquery(query) => (
            vec![Expr::new(
                ExprKind::Subquery(Box::new(lower_query(query))),
                query.span().into(),
            )],
            false,
        ),
        sql::FunctionArguments::List(list) => (
            list.args
                .iter()
                .map(|arg| lower_function_arg(arg, span))
                .collect(),
            matches!(
                list.duplicate_treatment,
                Some(sql::DuplicateTreatment::Distinct)
            ),
        ),
    };

    let over = match &function.over {
        Some(sql::WindowType::WindowSpec(spec)) => Some(WindowSpec {
            name: spec.window_name.as_ref().map(lower_ident),
            partition_by: spec.partition_by.iter().map(lower_expr).collect(),
            order_by: spec.order_by.iter().map(lower_order_by_expr).collect(),
        }),
        Some(sql::WindowType::NamedWindow(name)) => Some(WindowSpec {
            name: Some(lower_ident(name)),
            partition_by: Vec::new(),
            order_by: Vec::new(),
        }),
        None => None,
    };

    FunctionCall {
        name: lower_object_name(&function.name),
        args,
        distinct,
        filter: function.filter.as_deref().map(boxed),
        over,
    }
}

fn lower_function_arg(arg: &sql::FunctionArg, span: Span) -> Expr {
    let arg_expr = match arg {
        sql::FunctionArg::Named { arg, .. }
        | sql::FunctionArg::ExprNamed { arg, .. }
        | sql::FunctionArg::Unnamed(arg) => arg,
    };
    match arg_expr {
        sql::FunctionArgExpr::Expr(expr) => lower_expr(expr),
        sql::FunctionArgExpr::QualifiedWildcard(name) => Expr::new(
            ExprKind::Star {
                qualifier: Some(lower_object_name(name)),
            },
            span,
        ),
        sql::FunctionArgExpr::Wildcard => Expr::new(ExprKind::Star { qualifier: None }, span),
    }
}

fn lower_value(value: &sql::Value) -> Literal {
    match value {
        sql::Value::Number(number, _) => Literal {
            kind: LiteralKind::Number,
            value: number.clone(),
        },
        sql::Value::SingleQuotedString(text) => Literal {
            kind: LiteralKind::String,
            value: text.clone(),
        },
        sql::Value::Boolean(flag) => Literal {
            kind: LiteralKind::Boolean,
            value: flag.to_string(),
        },
        sql::Value::Null => Literal {
            kind: LiteralKind::Null,
            value: "NULL".to_string(),
        },
        other => Literal {
            kind: LiteralKind::Other,
            value: other.to_string(),
        },
    }
}

fn lower_binary_operator(op: &sql::BinaryOperator) -> BinaryOperator {
    match op {
        sql::BinaryOperator::Eq => BinaryOperator::Eq,
        sql::BinaryOperator::NotEq => BinaryOperator::NotEq,
        sql::BinaryOperator::Lt => BinaryOperator::Lt,
        sql::BinaryOperator::LtEq => BinaryOperator::LtEq,
        sql::BinaryOperator::Gt => BinaryOperator::Gt,
        sql::BinaryOperator::GtEq => BinaryOperator::GtEq,
        sql::BinaryOperator::And => BinaryOperator::And,
        sql::BinaryOperator::Or => BinaryOperator::Or,
        sql::BinaryOperator::Plus => BinaryOperator::Plus,
        sql::BinaryOperator::Minus => BinaryOperator::Minus,
        sql::BinaryOperator::Multiply => BinaryOperator::Multiply,
        sql::BinaryOperator::Divide => BinaryOperator::Divide,
        sql::BinaryOperator::Modulo => BinaryOperator::Modulo,
        sql::BinaryOperator::StringConcat => BinaryOperator::Concat,
        other => BinaryOperator::Other(other.to_string()),
    }
}
