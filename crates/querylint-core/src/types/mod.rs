//! Value types shared by the parser adapter, the rule engine and reporters.
//!
//! Diagnostics are plain data: rules build them, the analyzer merges them and
//! an external reporter decides how to render them.

mod common;
mod dialect;

pub use common::{
    documentation_url, rule_codes, Diagnostic, Impact, Location, Severity, Span,
    DOCUMENTATION_BASE_URL,
};
pub use dialect::{Dialect, DialectFeature};
