//! sqlport: database schema and data migration via portable XML snapshots
//!
//! This library exports a live database's table structure (and optionally
//! row data) into a self-describing XML snapshot document, and merges such a
//! document back into a live database: structural differences are computed
//! against the current schema and applied as dialect-correct DDL, then row
//! data is replayed as INSERTs.
//!
//! Two dialects are supported: MySQL (full-featured) and SQLite
//! (constrained — operations its ALTER vocabulary cannot express fail
//! loudly instead of degrading silently).

pub mod connector;
pub mod dialect;
pub mod diff;
pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod schema;

use anyhow::Result;

pub use connector::{Connector, DocumentConnector};
pub use dialect::{new_dialect, DialectKind, SchemaDialect};
pub use error::SqlPortError;
pub use export::DatabaseExporter;
pub use import::{DatabaseImporter, ImportSummary};

/// Options for planning an update offline.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Target dialect.
    pub dialect: DialectKind,
    /// Desired-state snapshot document.
    pub desired_xml: String,
    /// Snapshot of the current live structure.
    pub current_xml: String,
    /// Table name prefix replacing the wildcard token.
    pub prefix: String,
    /// Also plan INSERT statements for embedded row data.
    pub with_data: bool,
}

/// Compute the statements an update would execute, without a live database.
///
/// The "current" snapshot is served through a [`DocumentConnector`] and the
/// real importer runs against it, recording every statement instead of
/// executing it.
pub fn plan_update(options: &PlanOptions) -> Result<Vec<String>> {
    let current = document::parse_document(&options.current_xml)?;
    let connector = DocumentConnector::new(options.dialect, &current, &options.prefix);

    let importer = DatabaseImporter::new(new_dialect(options.dialect))
        .connector(&connector)
        .set_source(&options.desired_xml)?
        .with_structure(true)
        .with_data(options.with_data)
        .logger(Box::new(logging::StdLog));
    importer.process()?;

    Ok(connector.executed())
}
