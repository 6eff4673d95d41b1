//! SQL dialect descriptor.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SQL dialect for parsing and dialect-conditional rule behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Ansi,
    Bigquery,
    Clickhouse,
    Databricks,
    Duckdb,
    Hive,
    Mssql,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
    Sqlite,
}

/// Dialect-specific constructs a rule may need to ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DialectFeature {
    /// `expr::type` shorthand casts
    DoubleColonCast,
    /// `TRY_CAST(expr AS type)`
    TryCast,
    /// `SAFE_CAST(expr AS type)`
    SafeCast,
    /// `QUALIFY` clause
    Qualify,
    /// `LATERAL` derived tables
    LateralJoin,
    /// `ILIKE` operator
    Ilike,
    /// `agg(...) FILTER (WHERE ...)`
    AggregateFilter,
    /// `x -> expr` lambda functions
    Lambda,
    /// `STRUCT(...)` literals
    StructLiteral,
}

impl Dialect {
    pub const ALL: [Dialect; 13] = [
        Self::Generic,
        Self::Ansi,
        Self::Bigquery,
        Self::Clickhouse,
        Self::Databricks,
        Self::Duckdb,
        Self::Hive,
        Self::Mssql,
        Self::Mysql,
        Self::Postgres,
        Self::Redshift,
        Self::Snowflake,
        Self::Sqlite,
    ];

    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, DuckDbDialect,
            GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
            RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Clickhouse => Box::new(ClickHouseDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }

    /// Returns true if the dialect accepts the given construct.
    ///
    /// `Generic` is permissive and accepts everything.
    pub fn supports(&self, feature: DialectFeature) -> bool {
        use DialectFeature::*;

        if matches!(self, Self::Generic) {
            return true;
        }

        match feature {
            DoubleColonCast => matches!(
                self,
                Self::Postgres
                    | Self::Redshift
                    | Self::Snowflake
                    | Self::Duckdb
                    | Self::Databricks
                    | Self::Clickhouse
            ),
            TryCast => matches!(
                self,
                Self::Mssql | Self::Snowflake | Self::Duckdb | Self::Databricks
            ),
            SafeCast => matches!(self, Self::Bigquery),
            Qualify => matches!(
                self,
                Self::Snowflake | Self::Bigquery | Self::Databricks | Self::Duckdb
            ),
            LateralJoin => matches!(
                self,
                Self::Postgres | Self::Snowflake | Self::Mysql | Self::Duckdb | Self::Databricks
            ),
            Ilike => matches!(
                self,
                Self::Postgres | Self::Snowflake | Self::Duckdb | Self::Redshift | Self::Clickhouse
            ),
            AggregateFilter => matches!(self, Self::Postgres | Self::Sqlite | Self::Duckdb),
            Lambda => matches!(self, Self::Duckdb | Self::Databricks | Self::Clickhouse),
            StructLiteral => matches!(self, Self::Bigquery | Self::Duckdb | Self::Databricks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_supports_everything() {
        assert!(Dialect::Generic.supports(DialectFeature::DoubleColonCast));
        assert!(Dialect::Generic.supports(DialectFeature::SafeCast));
    }

    #[test]
    fn shorthand_cast_is_dialect_specific() {
        assert!(Dialect::Postgres.supports(DialectFeature::DoubleColonCast));
        assert!(!Dialect::Mysql.supports(DialectFeature::DoubleColonCast));
        assert!(!Dialect::Mssql.supports(DialectFeature::DoubleColonCast));
    }

    #[test]
    fn dialect_deserializes_lowercase() {
        let dialect: Dialect = serde_json::from_str("\"snowflake\"").unwrap();
        assert_eq!(dialect, Dialect::Snowflake);
    }
}
