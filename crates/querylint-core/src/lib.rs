pub mod ast;
pub mod error;
pub mod linter;
pub mod parser;
pub mod types;

// Re-export main types and functions
pub use error::{ConfigError, ParseError, RegistryError};
pub use linter::config::LintConfig;
pub use linter::registry::{global as global_registry, RuleRegistry};
pub use linter::rule::{LintContext, LintRule, RuleGroup, RuleMeta};
pub use linter::{analyze, lint_sql, Linter};
pub use parser::{parse_sql, parse_sql_with_dialect};

// Re-export types explicitly
pub use types::{
    // Rule codes
    rule_codes,
    // Diagnostics
    documentation_url,
    Diagnostic,
    Dialect,
    DialectFeature,
    Impact,
    Location,
    Severity,
    Span,
};
