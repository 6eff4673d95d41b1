//! LINT_AL_004: Alias length.
//!
//! Table aliases outside the configured length window. The lower bound is
//! off unless `min_alias_length` is set.

use crate::ast::Statement;
use crate::linter::collect::table_refs;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_AL_004,
    name: "aliasing.length",
    group: RuleGroup::Aliasing,
    description: "Table aliases should be neither too short nor too long.",
    default_severity: Severity::Info,
    config_keys: &["min_alias_length", "max_alias_length"],
};

const DEFAULT_MAX_ALIAS_LENGTH: usize = 30;

pub struct AliasLength;

impl LintRule for AliasLength {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let min = ctx.option_usize("min_alias_length").unwrap_or(0);
        let max = ctx
            .option_usize("max_alias_length")
            .unwrap_or(DEFAULT_MAX_ALIAS_LENGTH);

        table_refs(Node::Statement(statement))
            .into_iter()
            .filter_map(|table| table.alias())
            .filter_map(|alias| {
                let length = alias.value.chars().count();
                let message = if length < min {
                    format!(
                        "Table alias '{}' is shorter than {min} characters.",
                        alias.value
                    )
                } else if length > max {
                    format!(
                        "Table alias '{}' is longer than {max} characters.",
                        alias.value
                    )
                } else {
                    return None;
                };
                Some(ctx.diagnostic(message).with_span(alias.span))
            })
            .collect()
    }
}
