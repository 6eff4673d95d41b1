use crate::ast::{lower::lower_statement, Statement};
use crate::error::ParseError;
use crate::types::Dialect;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
#[cfg(feature = "tracing")]
use tracing::debug;

/// Parse SQL with the given dialect and lower every statement into the lint
/// node model.
pub fn parse_sql_with_dialect(sql: &str, dialect: Dialect) -> Result<Vec<Statement>, ParseError> {
    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    let statements = match Parser::parse_sql(sqlparser_dialect.as_ref(), sql) {
        Ok(statements) => statements,
        Err(primary_err) => {
            // Generic frequently fails on Postgres-only operators (`::`, `->>`)
            // common in warehouse SQL.
            if matches!(dialect, Dialect::Generic) && looks_like_postgres_syntax(sql) {
                let postgres = PostgreSqlDialect {};
                if let Ok(statements) = Parser::parse_sql(&postgres, sql) {
                    #[cfg(feature = "tracing")]
                    debug!("generic dialect failed, parsed with postgres fallback");
                    return Ok(statements.iter().map(lower_statement).collect());
                }
            }
            return Err(ParseError::from(primary_err).with_dialect(dialect));
        }
    };

    Ok(statements.iter().map(lower_statement).collect())
}

fn looks_like_postgres_syntax(sql: &str) -> bool {
    sql.contains("::") || sql.contains("->") || sql.contains("?|") || sql.contains("?&")
}

/// Parse SQL using the generic dialect.
pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, ParseError> {
    parse_sql_with_dialect(sql, Dialect::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_parse_valid_select() {
        let statements = parse_sql("SELECT * FROM users").unwrap();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].query().is_some());
    }

    #[test]
    fn test_parse_invalid_sql() {
        let err = parse_sql("SELECT * FROM").unwrap_err();
        assert_eq!(err.dialect, Some(Dialect::Generic));
        assert_ne!(err.kind, ParseErrorKind::RecursionLimit);
    }

    #[test]
    fn test_parse_multiple_statements() {
        let statements = parse_sql("SELECT * FROM users; SELECT * FROM orders;").unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_parse_with_postgres_dialect() {
        let sql = "SELECT * FROM users WHERE name ILIKE '%test%'";
        assert!(parse_sql_with_dialect(sql, Dialect::Postgres).is_ok());
    }

    #[test]
    fn test_parse_ddl_lowers_to_other() {
        let statements = parse_sql("CREATE TABLE t (id INT)").unwrap();
        assert!(statements[0].query().is_none());
    }
}
