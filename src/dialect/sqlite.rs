//! SQLite dialect: constrained generator
//!
//! SQLite's ALTER vocabulary cannot express arbitrary structural edits, so
//! most key operations and column changes are rejected as unsupported rather
//! than silently skipped. Source column types are narrowed to SQLite storage
//! classes before emission; a type outside the classification table is a
//! hard failure.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DialectKind, SchemaDialect};
use crate::error::{Result, SqlPortError};
use crate::schema::{Column, Key, KeyRole, Table};

/// Length and precision suffixes of raw column types, e.g. the "(11)" in
/// "tinyint(11) unsigned".
static TYPE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9()]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    pub fn new() -> Self {
        Self
    }

    /// Narrow a raw source type to a SQLite storage class.
    fn simple_type(&self, raw: &str) -> Result<&'static str> {
        let stripped = TYPE_SUFFIX.replace_all(raw, "");
        let stripped = stripped.replace("unsigned", "");
        match stripped.trim() {
            "int" | "tinyint" | "smallint" | "mediumint" | "bigint" => Ok("INTEGER"),
            "varchar" | "char" | "text" | "tinytext" | "mediumtext" | "longtext" | "datetime" => {
                Ok("TEXT")
            }
            _ => Err(SqlPortError::UnknownType {
                data_type: raw.to_string(),
            }),
        }
    }
}

impl SchemaDialect for SqliteDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn quote_name(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn quote_value(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn column_definition(&self, column: &Column) -> Result<String> {
        let simple = self.simple_type(&column.data_type)?;
        // SQLite has no auto_increment modifier; rowid aliasing covers it.
        let extra = column.extra.replace("auto_increment", "");
        let extra = extra.trim();

        let mut sql = String::new();
        if !column.comment.is_empty() {
            sql.push_str("--- ");
            sql.push_str(&column.comment);
            sql.push('\n');
        }
        sql.push_str(&column.name);
        sql.push(' ');
        sql.push_str(simple);

        // Primary key columns get their constraint from the key section.
        if column.key != KeyRole::Primary {
            match &column.default {
                Some(default) => {
                    sql.push_str(" DEFAULT ");
                    sql.push_str(&self.quote_value(default));
                }
                None if column.nullable => sql.push_str(" DEFAULT NULL"),
                None => {}
            }
        }
        if !extra.is_empty() {
            sql.push(' ');
            sql.push_str(&extra.to_uppercase());
        }

        Ok(sql)
    }

    fn key_definition(&self, group: &[&Key]) -> Result<Option<String>> {
        if group.is_empty() {
            return Ok(None);
        }
        let first = group[0];
        let columns = group
            .iter()
            .map(|k| k.column.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if first.is_primary() {
            Ok(Some(format!("PRIMARY KEY ({})", columns)))
        } else if !first.non_unique {
            Ok(Some(format!(
                "CONSTRAINT {} UNIQUE ({})",
                self.quote_name(&first.name),
                columns
            )))
        } else {
            // Non-unique secondary indexes have no rendered form here.
            Ok(None)
        }
    }

    fn change_column(&self, _table: &str, _column: &Column) -> Result<String> {
        Err(SqlPortError::unsupported(
            "change column",
            self.kind().name(),
        ))
    }

    fn add_key(&self, table: &str, group: &[&Key]) -> Result<String> {
        if group.len() == 1 && !group[0].non_unique && !group[0].is_primary() {
            let key = group[0];
            return Ok(format!(
                "CREATE UNIQUE INDEX {} ON {} ({})",
                self.quote_name(&key.name),
                self.quote_name(table),
                key.column
            ));
        }
        Err(SqlPortError::unsupported("add key", self.kind().name()))
    }

    fn drop_key(&self, _table: &str, _name: &str) -> Result<String> {
        Err(SqlPortError::unsupported("drop key", self.kind().name()))
    }

    fn drop_primary_key(&self, _table: &str) -> Result<String> {
        Err(SqlPortError::unsupported(
            "drop primary key",
            self.kind().name(),
        ))
    }

    fn insert_statements(&self, table: &Table) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for row in &table.rows {
            if row.is_empty() {
                continue;
            }
            if lines.is_empty() {
                // The first row names the columns via aliases.
                let fields = row
                    .iter()
                    .map(|(name, value)| format!("{} AS {}", self.quote_value(value), name))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("    SELECT {}", fields));
            } else {
                let values = row
                    .iter()
                    .map(|(_, value)| self.quote_value(value))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("UNION SELECT {}", values));
            }
        }

        if lines.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![format!(
            "INSERT INTO {}\n{}",
            self.quote_name(&table.name),
            lines.join("\n")
        )])
    }
}
