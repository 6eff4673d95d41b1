//! SQL linter module.
//!
//! Rules are independent checks over the lowered node model. The [`Linter`]
//! selects the enabled subset of a [`RuleRegistry`], runs each rule against
//! the same statement, and concatenates the findings in registry order.

pub mod collect;
pub mod config;
pub mod helpers;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod visit;

use std::panic::{self, AssertUnwindSafe};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use config::LintConfig;
use registry::RuleRegistry;
use rule::{LintContext, LintRule};

use crate::ast::Statement;
use crate::error::ParseError;
use crate::parser::parse_sql_with_dialect;
use crate::types::{documentation_url, Diagnostic, Dialect};

/// The SQL linter: a rule catalog plus the configuration selecting from it.
pub struct Linter<'r> {
    registry: &'r RuleRegistry,
    config: LintConfig,
}

impl Linter<'static> {
    /// Creates a linter over the built-in rule catalog.
    pub fn new(config: LintConfig) -> Self {
        Self::with_registry(registry::global(), config)
    }
}

impl<'r> Linter<'r> {
    pub fn with_registry(registry: &'r RuleRegistry, config: LintConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Rules that will run, in registry order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &(dyn LintRule + 'static)> {
        self.registry
            .iter()
            .filter(|rule| self.config.is_rule_enabled(rule.meta()))
    }

    /// Checks one statement against every enabled rule.
    pub fn check(&self, statement: &Statement, dialect: Dialect) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for rule in self.enabled_rules() {
            let meta = rule.meta();
            let ctx = LintContext::new(meta, dialect)
                .with_options(self.config.rule_options(meta))
                .with_severity(self.config.severity_for(meta));

            for mut diagnostic in run_isolated(rule, statement, &ctx) {
                if diagnostic.doc_url.is_none() {
                    diagnostic.doc_url = Some(documentation_url(&diagnostic.code));
                }
                diagnostics.push(diagnostic);
            }
        }

        #[cfg(feature = "tracing")]
        debug!(
            count = diagnostics.len(),
            ?dialect,
            "lint check completed"
        );

        diagnostics
    }

    /// Checks several statements, stamping each finding with the index of
    /// the statement it came from.
    pub fn check_statements(&self, statements: &[Statement], dialect: Dialect) -> Vec<Diagnostic> {
        statements
            .iter()
            .enumerate()
            .flat_map(|(index, statement)| {
                self.check(statement, dialect)
                    .into_iter()
                    .map(move |diagnostic| diagnostic.with_statement(index))
            })
            .collect()
    }
}

/// Runs one rule; a rule that panics contributes nothing.
fn run_isolated(rule: &dyn LintRule, statement: &Statement, ctx: &LintContext) -> Vec<Diagnostic> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(statement, ctx))) {
        Ok(diagnostics) => diagnostics,
        Err(_) => {
            #[cfg(feature = "tracing")]
            warn!(rule = rule.meta().code, "lint rule panicked; its findings were dropped");
            Vec::new()
        }
    }
}

/// Checks one statement with the built-in rules.
pub fn analyze(statement: &Statement, dialect: Dialect, config: &LintConfig) -> Vec<Diagnostic> {
    Linter::new(config.clone()).check(statement, dialect)
}

/// Parses `sql` and checks every statement in it.
pub fn lint_sql(
    sql: &str,
    dialect: Dialect,
    config: &LintConfig,
) -> Result<Vec<Diagnostic>, ParseError> {
    let statements = parse_sql_with_dialect(sql, dialect)?;
    Ok(Linter::new(config.clone()).check_statements(&statements, dialect))
}
