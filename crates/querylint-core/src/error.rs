//! Error types for parsing, rule registration and configuration.
//!
//! # Error Handling Strategy
//!
//! - [`ParseError`]: the SQL text could not be parsed. Returned as
//!   `Result<T, ParseError>` from the parser adapter; the linter never sees
//!   the statement.
//!
//! - [`RegistryError`]: a rule catalog was assembled incorrectly. This is a
//!   startup-time defect and never happens while analyzing a statement.
//!
//! - [`ConfigError`]: a configuration document could not be decoded or
//!   names rules that do not exist.
//!
//! Findings themselves are never errors: rules return
//! [`crate::types::Diagnostic`] values, and a rule that cannot apply simply
//! returns none.

use crate::types::{Dialect, Location};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error encountered while parsing SQL text.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// 1-based position of the error, if the parser reported one.
    pub position: Option<Location>,
    /// The SQL dialect being parsed when the error occurred.
    pub dialect: Option<Dialect>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Category of parse error for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// Unexpected token or character in input.
    #[default]
    SyntaxError,
    /// Missing required clause or keyword.
    MissingClause,
    /// Invalid or unexpected end of input.
    UnexpectedEof,
    /// Feature not supported by the current dialect.
    UnsupportedFeature,
    /// Lexer/tokenization error.
    LexerError,
    /// Input nested deeper than the parser's recursion limit.
    RecursionLimit,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
            kind: ParseErrorKind::SyntaxError,
        }
    }

    pub fn with_position(message: impl Into<String>, line: u64, column: u64) -> Self {
        Self {
            position: Some(Location::new(line, column)),
            ..Self::new(message)
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Extracts `Line: X, Column: Y` from a sqlparser message.
    ///
    /// Coupled to sqlparser's message format; returns `None` when the format
    /// is not found.
    fn parse_position_from_message(message: &str) -> Option<Location> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = POSITION_REGEX.get_or_init(|| {
            Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("Invalid regex pattern")
        });

        let result = re.captures(message).and_then(|caps| {
            let line: u64 = caps.get(1)?.as_str().parse().ok()?;
            let column: u64 = caps.get(2)?.as_str().parse().ok()?;
            Some(Location::new(line, column))
        });

        #[cfg(feature = "tracing")]
        if result.is_none() && (message.contains("Line") || message.contains("Column")) {
            trace!(
                "Failed to parse position from error message that appears to contain position info: {}",
                message
            );
        }

        result
    }

    fn infer_kind_from_message(message: &str) -> ParseErrorKind {
        let lower = message.to_lowercase();
        if lower.contains("unexpected end") || lower.contains("eof") {
            ParseErrorKind::UnexpectedEof
        } else if lower.contains("expected") {
            ParseErrorKind::MissingClause
        } else if lower.contains("not supported") || lower.contains("unsupported") {
            ParseErrorKind::UnsupportedFeature
        } else if lower.contains("lexer") || lower.contains("token") {
            ParseErrorKind::LexerError
        } else {
            ParseErrorKind::SyntaxError
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error")?;

        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect:?})")?;
        }

        if let Some(position) = self.position {
            write!(f, " at line {}, column {}", position.line, position.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<sqlparser::parser::ParserError> for ParseError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        let kind = match &err {
            sqlparser::parser::ParserError::RecursionLimitExceeded => ParseErrorKind::RecursionLimit,
            sqlparser::parser::ParserError::TokenizerError(_) => ParseErrorKind::LexerError,
            sqlparser::parser::ParserError::ParserError(message) => {
                Self::infer_kind_from_message(message)
            }
        };
        let message = err.to_string();
        let position = Self::parse_position_from_message(&message);

        Self {
            message,
            position,
            dialect: None,
            kind,
        }
    }
}

/// Rule catalog assembly failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("rule {code} is already registered")]
    DuplicateRule { code: String },
    #[error("rule name {name} is already registered by {existing}")]
    DuplicateName { name: String, existing: String },
}

/// Configuration decoding or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid lint configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown rule '{0}' in lint configuration")]
    UnknownRule(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_from_message() {
        let msg = "Expected SELECT, found 'INSERT' at Line: 1, Column: 5";
        let pos = ParseError::parse_position_from_message(msg);
        assert_eq!(pos, Some(Location::new(1, 5)));
    }

    #[test]
    fn test_parse_position_no_position() {
        assert_eq!(
            ParseError::parse_position_from_message("Unexpected token"),
            None
        );
    }

    #[test]
    fn test_parse_position_no_whitespace() {
        let pos = ParseError::parse_position_from_message("Error at Line:1,Column:5");
        assert_eq!(pos, Some(Location::new(1, 5)));
    }

    #[test]
    fn test_parse_position_reversed_order() {
        let pos = ParseError::parse_position_from_message("Error at Column: 5, Line: 1");
        assert_eq!(pos, None);
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(
            ParseError::infer_kind_from_message("Unexpected end of input"),
            ParseErrorKind::UnexpectedEof
        );
        assert_eq!(
            ParseError::infer_kind_from_message("Expected SELECT keyword"),
            ParseErrorKind::MissingClause
        );
        assert_eq!(
            ParseError::infer_kind_from_message("Something went wrong"),
            ParseErrorKind::SyntaxError
        );
    }

    #[test]
    fn test_display_with_dialect_and_position() {
        let err = ParseError::with_position("Bad syntax", 1, 5).with_dialect(Dialect::Snowflake);
        assert_eq!(
            err.to_string(),
            "Parse error (Snowflake) at line 1, column 5: Bad syntax"
        );
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DuplicateRule {
            code: "LINT_AL_001".to_string(),
        };
        assert_eq!(err.to_string(), "rule LINT_AL_001 is already registered");
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
