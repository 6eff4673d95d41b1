//! LINT_CV_001: Prefer COALESCE.
//!
//! `IFNULL` and `NVL` are dialect-specific two-argument forms of the portable
//! `COALESCE`.

use crate::ast::Statement;
use crate::linter::collect::functions;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_001,
    name: "convention.coalesce",
    group: RuleGroup::Convention,
    description: "Use COALESCE instead of IFNULL or NVL.",
    default_severity: Severity::Info,
    config_keys: &[],
};

const NON_PORTABLE: [&str; 2] = ["IFNULL", "NVL"];

pub struct PreferCoalesce;

impl LintRule for PreferCoalesce {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        functions(Node::Statement(statement))
            .into_iter()
            .filter_map(|function| {
                let name = NON_PORTABLE
                    .iter()
                    .find(|name| function.is_named(name))?;
                Some(
                    ctx.diagnostic(format!("Use COALESCE instead of {name}."))
                        .with_span(function.span)
                        .fixable(),
                )
            })
            .collect()
    }
}
