//! Snapshot-backed connector
//!
//! Serves structure and row data from a parsed document and records executed
//! statements instead of running them. This is what the `plan` command and
//! the test suite run the real importer against.

use std::cell::RefCell;

use anyhow::{bail, Result};

use crate::dialect::{new_dialect, DialectKind};
use crate::schema::{Column, Document, Key, Row};

use super::Connector;

pub struct DocumentConnector {
    kind: DialectKind,
    prefix: String,
    snapshot: Document,
    executed: RefCell<Vec<String>>,
}

impl DocumentConnector {
    /// Bind a snapshot as the "live" structure. The wildcard prefix is
    /// resolved once, here, so the connector only presents real names.
    pub fn new(kind: DialectKind, snapshot: &Document, prefix: &str) -> Self {
        DocumentConnector {
            kind,
            prefix: prefix.to_string(),
            snapshot: snapshot.resolve_prefix(prefix),
            executed: RefCell::new(Vec::new()),
        }
    }

    /// The statements "executed" against this connector, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl Connector for DocumentConnector {
    fn kind(&self) -> DialectKind {
        self.kind
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn table_list(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshot
            .tables
            .iter()
            .filter(|t| t.has_structure())
            .map(|t| t.name.clone())
            .collect())
    }

    fn table_columns(&self, table: &str) -> Result<Vec<Column>> {
        match self.snapshot.table(table) {
            Some(entry) => Ok(entry.columns.clone()),
            None => bail!("unknown table: {}", table),
        }
    }

    fn table_keys(&self, table: &str) -> Result<Vec<Key>> {
        match self.snapshot.table(table) {
            Some(entry) => Ok(entry.keys.clone()),
            None => bail!("unknown table: {}", table),
        }
    }

    fn quote_name(&self, name: &str) -> String {
        new_dialect(self.kind).quote_name(name)
    }

    fn quote_value(&self, value: &str) -> String {
        new_dialect(self.kind).quote_value(value)
    }

    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>> {
        match self.snapshot.table(table) {
            Some(entry) => Ok(entry.rows.clone()),
            None => bail!("unknown table: {}", table),
        }
    }

    fn execute(&self, sql: &str) -> Result<()> {
        self.executed.borrow_mut().push(sql.to_string());
        Ok(())
    }
}
