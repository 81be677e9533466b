use std::fmt;
use std::str::FromStr;

use sqlparser::ast::{ColumnDef, Statement};
use sqlparser::dialect::{
    GenericDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;
use tracing::debug;

use crate::error::Error;

/// SQL dialect used to tokenize the DDL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Permissive dialect accepting most ANSI DDL.
    #[default]
    Generic,
    /// SQLite (accepts `[bracket]` identifiers and `AUTOINCREMENT`).
    Sqlite,
    /// MySQL / MariaDB.
    MySql,
    /// `PostgreSQL`.
    Postgres,
    /// Microsoft SQL Server.
    MsSql,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Generic => write!(f, "generic"),
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MsSql => write!(f, "mssql"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Dialect::Generic),
            "sqlite" => Ok(Dialect::Sqlite),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mssql" | "sqlserver" => Ok(Dialect::MsSql),
            _ => Err(format!("Invalid dialect: {s}")),
        }
    }
}

impl Dialect {
    fn parser_dialect(self) -> Box<dyn sqlparser::dialect::Dialect> {
        match self {
            Dialect::Generic => Box::new(GenericDialect {}),
            Dialect::Sqlite => Box::new(SQLiteDialect {}),
            Dialect::MySql => Box::new(MySqlDialect {}),
            Dialect::Postgres => Box::new(PostgreSqlDialect {}),
            Dialect::MsSql => Box::new(MsSqlDialect {}),
        }
    }
}

/// One column exactly as declared: name plus the raw type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    /// Unquoted column name, schema-given spelling.
    pub name: String,
    /// Rendered type token, e.g. `DECIMAL(10,2)`.
    pub data_type: String,
}

/// One `CREATE TABLE` statement: table name plus its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Table name as written in the schema, quoting included (e.g. `[ContentItemIndex]`).
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    /// Build a raw table from `(column name, type)` pairs.
    pub fn new(name: impl Into<String>, columns: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            columns: columns
                .iter()
                .map(|(name, data_type)| RawColumn {
                    name: (*name).to_string(),
                    data_type: (*data_type).to_string(),
                })
                .collect(),
        }
    }
}

impl From<ColumnDef> for RawColumn {
    fn from(column: ColumnDef) -> Self {
        Self {
            name: column.name.value,
            data_type: column.data_type.to_string(),
        }
    }
}

/// Parse DDL text into raw tables, one per `CREATE TABLE`, in statement order.
///
/// Every other statement kind is ignored. Text with no `CREATE TABLE` is an error.
pub fn parse_schema(sql: &str, dialect: Dialect) -> Result<Vec<RawTable>, Error> {
    let statements = Parser::parse_sql(dialect.parser_dialect().as_ref(), sql)?;
    let statement_count = statements.len();

    let tables: Vec<RawTable> = statements
        .into_iter()
        .filter_map(|statement| match statement {
            Statement::CreateTable(create) => Some(RawTable {
                name: create.name.to_string(),
                columns: create.columns.into_iter().map(RawColumn::from).collect(),
            }),
            _ => None,
        })
        .collect();

    debug!(
        %dialect,
        statements = statement_count,
        tables = tables.len(),
        "parsed DDL"
    );

    if tables.is_empty() {
        return Err(Error::NoTables);
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_schema_keeps_table_and_column_order() {
        let sql = "
            CREATE TABLE b (z INT, a VARCHAR(10));
            CREATE TABLE a (created_at DATETIME);
        ";
        let tables = parse_schema(sql, Dialect::Generic).expect("DDL should parse");
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        let columns: Vec<_> = tables[0].columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(columns, ["z", "a"]);
    }

    #[test]
    fn parse_schema_ignores_non_create_table_statements() {
        let sql = "
            DROP TABLE IF EXISTS logs;
            CREATE TABLE logs (log_time TIMESTAMP);
            CREATE INDEX idx_logs ON logs (log_time);
        ";
        let tables = parse_schema(sql, Dialect::Sqlite).expect("DDL should parse");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns[0].data_type.to_lowercase(), "timestamp");
    }

    #[test]
    fn parse_schema_keeps_default_clause_out_of_the_type() {
        let sql = "CREATE TABLE t (signup_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP);";
        let tables = parse_schema(sql, Dialect::Generic).expect("DDL should parse");
        assert_eq!(tables[0].columns[0].data_type.to_lowercase(), "timestamp");
    }

    #[test]
    fn parse_schema_without_tables_is_an_error() {
        let err = parse_schema("DROP TABLE x;", Dialect::Generic).expect_err("no tables");
        assert!(matches!(err, Error::NoTables));
    }

    #[test]
    fn parse_schema_reports_malformed_sql() {
        let err = parse_schema("not sql", Dialect::Generic).expect_err("should not parse");
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn dialect_round_trips_through_its_name() {
        for dialect in [
            Dialect::Generic,
            Dialect::Sqlite,
            Dialect::MySql,
            Dialect::Postgres,
            Dialect::MsSql,
        ] {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
        }
        assert!("oracle".parse::<Dialect>().is_err());
    }
}
