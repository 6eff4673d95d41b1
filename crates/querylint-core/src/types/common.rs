//! Diagnostic model and source positions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Base URL for per-rule documentation pages.
pub const DOCUMENTATION_BASE_URL: &str = "https://querylint.dev/rules";

/// Builds the documentation URL for a rule code.
///
/// The URL depends only on the code, so reporters can link to docs without
/// any lookup.
pub fn documentation_url(code: &str) -> String {
    format!("{DOCUMENTATION_BASE_URL}/{}", code.to_ascii_lowercase())
}

/// A single finding produced by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Machine-readable rule code (e.g. `LINT_AM_004`)
    pub code: String,

    /// Severity level
    pub severity: Severity,

    /// Human-readable, self-contained message
    pub message: String,

    /// Optional: location in source SQL the finding points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,

    /// Optional: which statement index this finding relates to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_index: Option<usize>,

    /// Optional: link to the rule documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,

    /// Optional: ordinal weight used by reporters for prioritization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,

    /// Whether the finding could be rewritten automatically
    #[serde(default)]
    pub fixable: bool,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            span: None,
            statement_index: None,
            doc_url: None,
            impact: None,
            fixable: false,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, message)
    }

    pub fn hint(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Hint, message)
    }

    /// Attaches a span; empty spans are dropped so reporters never see a
    /// zero position.
    pub fn with_span(mut self, span: Span) -> Self {
        if !span.is_empty() {
            self.span = Some(span);
        }
        self
    }

    pub fn with_statement(mut self, index: usize) -> Self {
        self.statement_index = Some(index);
        self
    }

    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Marks the finding as automatically fixable.
    pub fn fixable(mut self) -> Self {
        self.fixable = true;
        self
    }
}

/// Advisory severity of a diagnostic, ordered `Hint < Info < Warning < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal impact weight. Only used by reporters for sorting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    /// Integer score, `Low = 1` through `Critical = 4`.
    pub const fn score(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

/// A 1-based line/column position in the source SQL.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    JsonSchema,
)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl Location {
    pub const fn new(line: u64, column: u64) -> Self {
        Self { line, column }
    }
}

/// A source range between two locations.
///
/// The all-zero span means "position unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Span {
    /// Inclusive start position
    pub start: Location,
    /// Exclusive end position
    pub end: Location,
}

impl Span {
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Location::new(0, 0),
            end: Location::new(0, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.line == 0 && self.end.line == 0
    }

    /// Smallest span covering both `self` and `other`, ignoring empty spans.
    pub fn union(&self, other: &Span) -> Span {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<sqlparser::tokenizer::Span> for Span {
    fn from(span: sqlparser::tokenizer::Span) -> Self {
        Self {
            start: Location::new(span.start.line, span.start.column),
            end: Location::new(span.end.line, span.end.column),
        }
    }
}

/// Machine-readable rule codes.
pub mod rule_codes {
    // Aliasing
    pub const LINT_AL_001: &str = "LINT_AL_001";
    pub const LINT_AL_002: &str = "LINT_AL_002";
    pub const LINT_AL_003: &str = "LINT_AL_003";
    pub const LINT_AL_004: &str = "LINT_AL_004";
    pub const LINT_AL_005: &str = "LINT_AL_005";
    pub const LINT_AL_006: &str = "LINT_AL_006";

    // Ambiguity
    pub const LINT_AM_001: &str = "LINT_AM_001";
    pub const LINT_AM_002: &str = "LINT_AM_002";
    pub const LINT_AM_003: &str = "LINT_AM_003";
    pub const LINT_AM_004: &str = "LINT_AM_004";
    pub const LINT_AM_005: &str = "LINT_AM_005";
    pub const LINT_AM_006: &str = "LINT_AM_006";
    pub const LINT_AM_007: &str = "LINT_AM_007";

    // Convention
    pub const LINT_CV_001: &str = "LINT_CV_001";
    pub const LINT_CV_002: &str = "LINT_CV_002";
    pub const LINT_CV_003: &str = "LINT_CV_003";
    pub const LINT_CV_004: &str = "LINT_CV_004";
    pub const LINT_CV_005: &str = "LINT_CV_005";
    pub const LINT_CV_006: &str = "LINT_CV_006";

    // Structure
    pub const LINT_ST_001: &str = "LINT_ST_001";
    pub const LINT_ST_002: &str = "LINT_ST_002";
    pub const LINT_ST_003: &str = "LINT_ST_003";
    pub const LINT_ST_004: &str = "LINT_ST_004";
    pub const LINT_ST_005: &str = "LINT_ST_005";
    pub const LINT_ST_006: &str = "LINT_ST_006";
    pub const LINT_ST_007: &str = "LINT_ST_007";
    pub const LINT_ST_008: &str = "LINT_ST_008";
    pub const LINT_ST_009: &str = "LINT_ST_009";

    // References
    pub const LINT_RF_001: &str = "LINT_RF_001";
    pub const LINT_RF_002: &str = "LINT_RF_002";
    pub const LINT_RF_003: &str = "LINT_RF_003";
    pub const LINT_RF_004: &str = "LINT_RF_004";
    pub const LINT_RF_005: &str = "LINT_RF_005";
}
