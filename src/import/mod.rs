//! Database import
//!
//! Drives the merge-then-insert sequence: reconcile each table definition in
//! a source document against the live structure, execute the resulting
//! statements in order, then replay embedded row data as INSERTs. Every
//! statement is reported to the attached log sink before execution; the
//! first failing statement aborts the whole run. Prior statements stay
//! committed — no transactional rollback is attempted at this layer.

use anyhow::Result;

use crate::connector::Connector;
use crate::dialect::SchemaDialect;
use crate::diff::{self, TableOp};
use crate::document;
use crate::error::SqlPortError;
use crate::logging::{LogLevel, NullLog, QueryLog};
use crate::schema::{Document, Table};

/// Outcome of a completed import.
#[derive(Debug, Clone, Copy)]
pub struct ImportSummary {
    pub statements_executed: usize,
}

impl std::fmt::Debug for DatabaseImporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseImporter")
            .field("connector", &self.connector.is_some())
            .field("source", &self.source)
            .field("with_structure", &self.with_structure)
            .field("with_data", &self.with_data)
            .finish()
    }
}

/// Imports a snapshot document into a live database.
pub struct DatabaseImporter<'c> {
    dialect: Box<dyn SchemaDialect>,
    connector: Option<&'c dyn Connector>,
    source: Option<Document>,
    with_structure: bool,
    with_data: bool,
    logger: Box<dyn QueryLog>,
}

impl<'c> DatabaseImporter<'c> {
    /// Create an importer for the given dialect generator. Structure merging
    /// is on by default; data replay is opt-in.
    pub fn new(dialect: Box<dyn SchemaDialect>) -> Self {
        DatabaseImporter {
            dialect,
            connector: None,
            source: None,
            with_structure: true,
            with_data: false,
            logger: Box::new(NullLog),
        }
    }

    pub fn connector(mut self, connector: &'c dyn Connector) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Parse and attach the source document.
    pub fn set_source(mut self, xml: &str) -> Result<Self> {
        self.source = Some(document::parse_document(xml)?);
        Ok(self)
    }

    pub fn with_structure(mut self, setting: bool) -> Self {
        self.with_structure = setting;
        self
    }

    pub fn with_data(mut self, setting: bool) -> Self {
        self.with_data = setting;
        self
    }

    pub fn logger(mut self, logger: Box<dyn QueryLog>) -> Self {
        self.logger = logger;
        self
    }

    /// Check that everything is in order prior to importing.
    fn check(&self) -> std::result::Result<(&'c dyn Connector, &Document), SqlPortError> {
        let connector = self
            .connector
            .ok_or_else(|| SqlPortError::precondition("no database connector is bound"))?;
        if connector.kind() != self.dialect.kind() {
            return Err(SqlPortError::precondition(format!(
                "connector dialect {} does not match importer dialect {}",
                connector.kind(),
                self.dialect.kind()
            )));
        }
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| SqlPortError::precondition("no source document set"))?;
        Ok((connector, source))
    }

    /// Run the import.
    pub fn process(&self) -> Result<ImportSummary> {
        let (connector, source) = self.check()?;
        let resolved = source.resolve_prefix(connector.prefix());
        let mut executed = 0;

        if self.with_structure {
            executed += self.merge_structure(connector, &resolved)?;
        }
        if self.with_data {
            executed += self.insert_data(connector, &resolved)?;
        }

        Ok(ImportSummary {
            statements_executed: executed,
        })
    }

    /// Merge the document's structure definitions into the live database.
    fn merge_structure(&self, connector: &dyn Connector, source: &Document) -> Result<usize> {
        let live_tables = connector.table_list()?;
        let mut executed = 0;

        for desired in source.tables.iter().filter(|t| t.has_structure()) {
            let ops = if live_tables.iter().any(|name| *name == desired.name) {
                let current = Table {
                    name: desired.name.clone(),
                    columns: connector.table_columns(&desired.name)?,
                    keys: connector.table_keys(&desired.name)?,
                    rows: Vec::new(),
                };
                diff::diff_table(desired, &current)
            } else {
                vec![TableOp::CreateTable(desired.clone())]
            };

            // Render the whole table's statements before executing any of
            // them, so an unsupported operation aborts with nothing applied
            // for this table.
            let mut statements = Vec::new();
            for op in &ops {
                statements.push(self.dialect.statement_for(op)?);
            }
            for sql in &statements {
                self.run_query(connector, sql)?;
                executed += 1;
            }
        }

        Ok(executed)
    }

    /// Replay embedded row data as INSERT statements.
    fn insert_data(&self, connector: &dyn Connector, source: &Document) -> Result<usize> {
        let mut executed = 0;

        for table in source.tables.iter().filter(|t| !t.rows.is_empty()) {
            for sql in self.dialect.insert_statements(table)? {
                self.run_query(connector, &sql)?;
                executed += 1;
            }
        }

        Ok(executed)
    }

    fn run_query(
        &self,
        connector: &dyn Connector,
        sql: &str,
    ) -> std::result::Result<(), SqlPortError> {
        self.logger.log(LogLevel::Debug, sql);
        if let Err(err) = connector.execute(sql) {
            self.logger.log(LogLevel::Error, sql);
            return Err(SqlPortError::Statement {
                sql: sql.to_string(),
                source: err.into(),
            });
        }
        Ok(())
    }
}
