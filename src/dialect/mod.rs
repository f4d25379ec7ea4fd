//! Dialect SQL generation
//!
//! Each supported engine implements the [`SchemaDialect`] capability trait.
//! Implementations are selected by configuration through [`DialectKind`] and
//! [`new_dialect`], not by inheritance. An operation a dialect cannot render
//! is a hard [`SqlPortError::Unsupported`] failure; silently skipping it
//! would leave structure inconsistent.

mod mysql;
mod sqlite;

pub use mysql::MysqlDialect;
pub use sqlite::SqliteDialect;

use std::fmt;

use crate::diff::TableOp;
use crate::error::Result;
use crate::schema::{key_lookup, Column, Key, Table};

/// Supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    Mysql,
    Sqlite,
}

impl DialectKind {
    pub fn name(&self) -> &'static str {
        match self {
            DialectKind::Mysql => "mysql",
            DialectKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mysqli" => Ok(DialectKind::Mysql),
            "sqlite" => Ok(DialectKind::Sqlite),
            _ => Err(format!("unknown dialect: {}", s)),
        }
    }
}

/// Create the generator for a configured dialect.
pub fn new_dialect(kind: DialectKind) -> Box<dyn SchemaDialect> {
    match kind {
        DialectKind::Mysql => Box::new(MysqlDialect::new()),
        DialectKind::Sqlite => Box::new(SqliteDialect::new()),
    }
}

/// SQL generation capability of one database engine.
///
/// Required methods cover the fragments that differ per engine; the provided
/// methods assemble the statements that are built the same way everywhere.
pub trait SchemaDialect {
    fn kind(&self) -> DialectKind;

    fn quote_name(&self, name: &str) -> String;

    fn quote_value(&self, value: &str) -> String;

    /// Column fragment for CREATE TABLE and column-level ALTER statements.
    fn column_definition(&self, column: &Column) -> Result<String>;

    /// Key fragment for CREATE TABLE.
    ///
    /// `Ok(None)` means the key group has no renderable form in this dialect
    /// and is omitted from the statement.
    fn key_definition(&self, group: &[&Key]) -> Result<Option<String>>;

    fn change_column(&self, table: &str, column: &Column) -> Result<String>;

    fn add_key(&self, table: &str, group: &[&Key]) -> Result<String>;

    fn drop_key(&self, table: &str, name: &str) -> Result<String>;

    /// Dropping a primary key is never emitted by the differ; this exists for
    /// explicit caller invocation only.
    fn drop_primary_key(&self, table: &str) -> Result<String>;

    /// INSERT statements replaying the table's row data.
    fn insert_statements(&self, table: &Table) -> Result<Vec<String>>;

    fn create_table(&self, table: &Table) -> Result<String> {
        let mut columns = Vec::new();
        for column in &table.columns {
            columns.push(self.column_definition(column)?);
        }

        let mut keys = Vec::new();
        for (_, group) in key_lookup(&table.keys) {
            if let Some(fragment) = self.key_definition(&group)? {
                keys.push(fragment);
            }
        }

        let mut body = columns.join(",\n");
        if !keys.is_empty() {
            body.push_str(",\n");
            body.push_str(&keys.join(",\n"));
        }

        Ok(format!(
            "CREATE TABLE {} (\n{}\n)",
            self.quote_name(&table.name),
            body
        ))
    }

    fn add_column(&self, table: &str, column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.quote_name(table),
            self.column_definition(column)?
        ))
    }

    fn drop_column(&self, table: &str, name: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote_name(table),
            self.quote_name(name)
        ))
    }

    /// Render one diff operation as a statement.
    fn statement_for(&self, op: &TableOp) -> Result<String> {
        match op {
            TableOp::CreateTable(table) => self.create_table(table),
            TableOp::AddColumn { table, column } => self.add_column(table, column),
            TableOp::ChangeColumn { table, column } => self.change_column(table, column),
            TableOp::DropColumn { table, column } => self.drop_column(table, column),
            TableOp::AddKey { table, keys } => {
                let group: Vec<&Key> = keys.iter().collect();
                self.add_key(table, &group)
            }
            TableOp::DropKey { table, name } => self.drop_key(table, name),
        }
    }
}
