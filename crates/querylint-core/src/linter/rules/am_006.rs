//! LINT_AM_006: Ambiguous column references.
//!
//! GROUP BY and ORDER BY items can name a column or point at a select-list
//! position (`GROUP BY 1`). Mixing the two styles within one SELECT is hard
//! to read. The `group_by_and_order_by_style` option picks the policy:
//! `consistent` (default), `explicit` (no positions) or `implicit` (only
//! positions).

use crate::ast::{Expr, ExprKind, LiteralKind, Statement};
use crate::linter::collect::{cores, queries};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_006,
    name: "ambiguous.column_references",
    group: RuleGroup::Ambiguous,
    description: "GROUP BY and ORDER BY should not mix positional and named references.",
    default_severity: Severity::Warning,
    config_keys: &["group_by_and_order_by_style"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceStyle {
    Consistent,
    Explicit,
    Implicit,
}

impl ReferenceStyle {
    fn from_context(ctx: &LintContext) -> Self {
        match ctx
            .option_str("group_by_and_order_by_style")
            .unwrap_or("consistent")
            .to_ascii_lowercase()
            .as_str()
        {
            "explicit" => Self::Explicit,
            "implicit" => Self::Implicit,
            _ => Self::Consistent,
        }
    }
}

pub struct AmbiguousColumnReferences;

impl LintRule for AmbiguousColumnReferences {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let style = ReferenceStyle::from_context(ctx);
        let root = Node::Statement(statement);
        let mut diagnostics = Vec::new();

        for core in cores(root) {
            let items = core
                .group_by
                .iter()
                .chain(core.order_by.iter().map(|item| &item.expr));
            check_items(items, style, ctx, &mut diagnostics);
        }
        for query in queries(root) {
            check_items(
                query.order_by.iter().map(|item| &item.expr),
                style,
                ctx,
                &mut diagnostics,
            );
        }
        diagnostics
    }
}

fn check_items<'a>(
    items: impl Iterator<Item = &'a Expr>,
    style: ReferenceStyle,
    ctx: &LintContext,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut first_positional = None;

    for item in items {
        let positional = is_positional(item);
        let violation = match style {
            ReferenceStyle::Explicit => positional,
            ReferenceStyle::Implicit => !positional,
            ReferenceStyle::Consistent => *first_positional.get_or_insert(positional) != positional,
        };
        if violation {
            let message = if positional {
                "Positional reference mixed with named references; refer to columns by name."
            } else {
                "Named reference mixed with positional references; use one reference style."
            };
            diagnostics.push(ctx.diagnostic(message).with_span(item.span));
        }
    }
}

fn is_positional(expr: &Expr) -> bool {
    matches!(&expr.kind, ExprKind::Literal(literal) if literal.kind == LiteralKind::Number)
}
