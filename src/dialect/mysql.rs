//! MySQL dialect: full-featured generator
//!
//! Supports the complete operation set, including per-column comments and
//! in-place column changes.

use super::{DialectKind, SchemaDialect};
use crate::error::{Result, SqlPortError};
use crate::schema::{Column, Key, Table};

#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaDialect for MysqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Mysql
    }

    fn quote_name(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn quote_value(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn column_definition(&self, column: &Column) -> Result<String> {
        let mut sql = format!("{} {}", self.quote_name(&column.name), column.data_type);

        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        match &column.default {
            Some(default) => {
                sql.push_str(" DEFAULT ");
                sql.push_str(&self.quote_value(default));
            }
            None if column.nullable => sql.push_str(" DEFAULT NULL"),
            None => {}
        }
        if !column.extra.is_empty() {
            sql.push(' ');
            sql.push_str(&column.extra.to_uppercase());
        }
        if !column.comment.is_empty() {
            sql.push_str(" COMMENT ");
            sql.push_str(&self.quote_value(&column.comment));
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
            .map(|k| self.quote_name(&k.column))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = if first.is_primary() {
            format!("PRIMARY KEY ({})", columns)
        } else if !first.non_unique {
            format!("UNIQUE KEY {} ({})", self.quote_name(&first.name), columns)
        } else {
            format!("KEY {} ({})", self.quote_name(&first.name), columns)
        };

        Ok(Some(sql))
    }

    fn change_column(&self, table: &str, column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} CHANGE COLUMN {} {}",
            self.quote_name(table),
            self.quote_name(&column.name),
            self.column_definition(column)?
        ))
    }

    fn add_key(&self, table: &str, group: &[&Key]) -> Result<String> {
        match self.key_definition(group)? {
            Some(fragment) => Ok(format!(
                "ALTER TABLE {} ADD {}",
                self.quote_name(table),
                fragment
            )),
            None => Err(SqlPortError::unsupported("add key", self.kind().name())),
        }
    }

    fn drop_key(&self, table: &str, name: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP KEY {}",
            self.quote_name(table),
            self.quote_name(name)
        ))
    }

    fn drop_primary_key(&self, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP PRIMARY KEY",
            self.quote_name(table)
        ))
    }

    fn insert_statements(&self, table: &Table) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for row in &table.rows {
            if row.is_empty() {
                continue;
            }
            let columns = row
                .iter()
                .map(|(name, _)| self.quote_name(name))
                .collect::<Vec<_>>()
                .join(", ");
            let values = row
                .iter()
                .map(|(_, value)| self.quote_value(value))
                .collect::<Vec<_>>()
                .join(", ");
            statements.push(format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.quote_name(&table.name),
                columns,
                values
            ));
        }
        Ok(statements)
    }
}
