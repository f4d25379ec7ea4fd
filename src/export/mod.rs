//! Database export
//!
//! Reads a live database's structure (and optionally data) through the
//! connector boundary and produces one intermediate document.

use anyhow::{Context, Result};

use crate::connector::Connector;
use crate::dialect::DialectKind;
use crate::document;
use crate::error::SqlPortError;
use crate::schema::{generic_table_name, real_table_name, Document, Table};

/// Exports tables from a live database into a snapshot document.
pub struct DatabaseExporter<'c> {
    kind: DialectKind,
    connector: Option<&'c dyn Connector>,
    tables: Vec<String>,
    with_structure: bool,
    with_data: bool,
}

impl<'c> DatabaseExporter<'c> {
    /// Create an exporter for the given dialect. Structure export is on by
    /// default; data export is opt-in.
    pub fn new(kind: DialectKind) -> Self {
        DatabaseExporter {
            kind,
            connector: None,
            tables: Vec::new(),
            with_structure: true,
            with_data: false,
        }
    }

    pub fn connector(mut self, connector: &'c dyn Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    /// The tables to export. Names may be real or carry the wildcard prefix.
    pub fn tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_structure(mut self, setting: bool) -> Self {
        self.with_structure = setting;
        self
    }

    pub fn with_data(mut self, setting: bool) -> Self {
        self.with_data = setting;
        self
    }

    /// Check that everything is in order prior to exporting.
    fn check(&self) -> std::result::Result<&'c dyn Connector, SqlPortError> {
        let connector = self
            .connector
            .ok_or_else(|| SqlPortError::precondition("no database connector is bound"))?;
        if connector.kind() != self.kind {
            return Err(SqlPortError::precondition(format!(
                "connector dialect {} does not match exporter dialect {}",
                connector.kind(),
                self.kind
            )));
        }
        if self.tables.is_empty() {
            return Err(SqlPortError::precondition("no tables specified"));
        }
        Ok(connector)
    }

    /// Run the export, producing one serialized document.
    pub fn export(&self) -> Result<String> {
        let document = self.build_document()?;
        Ok(document::write_document(&document)?)
    }

    /// Build the in-memory document without serializing it.
    pub fn build_document(&self) -> Result<Document> {
        let connector = self.check()?;
        let prefix = connector.prefix();
        let mut document = Document::default();

        for name in &self.tables {
            let real = real_table_name(name, prefix);
            let generic = generic_table_name(&real, prefix);
            let mut table = Table::new(&generic);

            if self.with_structure {
                table.columns = connector
                    .table_columns(&real)
                    .with_context(|| format!("reading column metadata for {}", real))?;
                table.keys = connector
                    .table_keys(&real)
                    .with_context(|| format!("reading key metadata for {}", real))?;
                for key in &mut table.keys {
                    key.table = generic.clone();
                }
            }

            if self.with_data {
                table.rows = connector
                    .fetch_rows(&real)
                    .with_context(|| format!("reading rows of {}", real))?;
            }

            document.tables.push(table);
        }

        Ok(document)
    }
}
