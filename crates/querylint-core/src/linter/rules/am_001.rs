//! LINT_AM_001: DISTINCT with GROUP BY.
//!
//! Grouped rows are already unique on the grouping key, so the DISTINCT is
//! redundant or hides an unintended fan-out.

use crate::ast::Statement;
use crate::linter::collect::cores;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AM_001,
    name: "ambiguous.distinct",
    group: RuleGroup::Ambiguous,
    description: "DISTINCT is redundant in a query that uses GROUP BY.",
    default_severity: Severity::Warning,
    config_keys: &[],
};

pub struct DistinctWithGroupBy;

impl LintRule for DistinctWithGroupBy {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        cores(Node::Statement(statement))
            .into_iter()
            .filter(|core| core.distinct && !core.group_by.is_empty())
            .map(|core| {
                ctx.diagnostic("DISTINCT is redundant when GROUP BY is present.")
                    .with_span(core.span)
                    .fixable()
            })
            .collect()
    }
}
