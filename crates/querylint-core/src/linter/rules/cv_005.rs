//! LINT_CV_005: Casting style.
//!
//! `CAST(x AS t)` and `x::t` should not be mixed within a statement. With
//! `preferred_type_casting_style` set to `cast` or `shorthand`, every cast in
//! the other style is reported instead. A `shorthand` preference applies
//! only to dialects that accept `::`; elsewhere the rule checks consistency.
//! `TRY_CAST` and `SAFE_CAST` have no shorthand and are ignored.

use crate::ast::{CastStyle, Expr, ExprKind, Statement};
use crate::linter::collect::collect;
use crate::linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
use crate::linter::visit::Node;
use crate::types::{rule_codes, Diagnostic, DialectFeature, Severity};

pub static META: RuleMeta = RuleMeta {
    code: rule_codes::LINT_CV_005,
    name: "convention.casting_style",
    group: RuleGroup::Convention,
    description: "Use a consistent type casting style.",
    default_severity: Severity::Info,
    config_keys: &["preferred_type_casting_style"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preference {
    Consistent,
    Cast,
    Shorthand,
}

impl Preference {
    fn from_context(ctx: &LintContext) -> Self {
        let configured = match ctx
            .option_str("preferred_type_casting_style")
            .unwrap_or("consistent")
            .to_ascii_lowercase()
            .as_str()
        {
            "cast" => Self::Cast,
            "shorthand" => Self::Shorthand,
            _ => Self::Consistent,
        };
        if configured == Self::Shorthand && !ctx.supports(DialectFeature::DoubleColonCast) {
            Self::Consistent
        } else {
            configured
        }
    }
}

pub struct CastingStyle;

impl LintRule for CastingStyle {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
        let casts: Vec<(&Expr, CastStyle)> = collect::<&Expr>(Node::Statement(statement))
            .into_iter()
            .filter_map(|expr| match &expr.kind {
                ExprKind::Cast {
                    style: style @ (CastStyle::Cast | CastStyle::DoubleColon),
                    ..
                } => Some((expr, *style)),
                _ => None,
            })
            .collect();

        let expected = match Preference::from_context(ctx) {
            Preference::Cast => CastStyle::Cast,
            Preference::Shorthand => CastStyle::DoubleColon,
            Preference::Consistent => match casts.first() {
                Some((_, style)) => *style,
                None => return Vec::new(),
            },
        };

        casts
            .into_iter()
            .filter(|(_, style)| *style != expected)
            .map(|(expr, style)| {
                ctx.diagnostic(format!(
                    "Use {} instead of {} for type casts.",
                    describe(expected),
                    describe(style)
                ))
                .with_span(expr.span)
            })
            .collect()
    }
}

fn describe(style: CastStyle) -> &'static str {
    match style {
        CastStyle::Cast => "CAST(... AS ...)",
        CastStyle::DoubleColon => "'::'",
        CastStyle::TryCast => "TRY_CAST",
        CastStyle::SafeCast => "SAFE_CAST",
    }
}
