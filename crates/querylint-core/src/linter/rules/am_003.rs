//! LINT_AM_003: Ambiguous ORDER BY direction.
//!
//! An ORDER BY that gives a direction for some items but not others reads
//! as if the explicit direction applied to all of them.

use crate::ast::{OrderByExpr, Statement};
use crate::linter::collect::{cores, queries};
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity, Span};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_003,
    name: "ambiguous.order_by",
    group: RuleGroup::Ambiguous,
    description: "ORDER BY items should either all or none specify a direction.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct AmbiguousOrderBy;

impl LintRule for AmbiguousOrderBy {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let root = Node::Statement(statement);
        let clauses = cores(root)
            .into_iter()
            .map(|core| core.order_by.as_slice())
            .chain(queries(root).into_iter().map(|query| query.order_by.as_slice()));

        clauses
            .filter(|order_by| mixes_directions(order_by))
            .map(|order_by| {
                let span = order_by
                    .iter()
                    .fold(Span::empty(), |span, item| span.union(&item.expr.span));
                ctx.diagnostic(
                    "ORDER BY mixes explicit and implicit sort directions; specify ASC or DESC for every item.",
                )
                .with_span(span)
            })
            .collect()
    }
}

fn mixes_directions(order_by: &[OrderByExpr]) -> bool {
    let explicit = order_by.iter().filter(|item| item.asc.is_some()).count();
    explicit > 0 && explicit < order_by.len()
}
