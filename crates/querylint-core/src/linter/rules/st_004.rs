//! LINT_ST_004: Avoid JOIN ... USING (...).
//!
//! USING hides which table each join column comes from and is not supported
//! uniformly across engines.

use crate::ast::Statement;
use crate::linter::collect::joins;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_ST_004,
    name: "structure.using",
    group: RuleGroup::Structure,
    description: "Prefer explicit ON conditions over JOIN ... USING.",
    default_severity: Severity::Info,
    config_keys: &[],
};

pub struct JoinUsing;

impl LintRule for JoinUsing {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        joins(Node::Statement(statement))
            .into_iter()
            .filter(|join| !join.using.is_empty())
            .map(|join| {
                let columns: Vec<&str> = join.using.iter().map(|c| c.value.as_str()).collect();
                ctx.diagnostic(format!(
                    "JOIN uses USING ({}); write the condition with ON instead.",
                    columns.join(", ")
                ))
                .with_span(join.span)
            })
            .collect()
    }
}
