//! Database connector boundary
//!
//! The engine never opens its own connections: it borrows a [`Connector`]
//! from the caller for the duration of one export or import call and issues
//! one statement at a time. Concrete drivers live outside this crate; the
//! snapshot-backed [`DocumentConnector`] is provided for offline planning and
//! testing.

mod document;

pub use document::DocumentConnector;

use anyhow::Result;

use crate::dialect::DialectKind;
use crate::schema::{Column, Key, Row};

/// Capability surface the engine consumes from a live database connection.
///
/// Methods return `anyhow::Result` so driver glue can surface its own error
/// types; the engine wraps execution failures into
/// [`SqlPortError::Statement`](crate::SqlPortError) with the exact SQL text.
pub trait Connector {
    /// The dialect this connection speaks.
    fn kind(&self) -> DialectKind;

    /// The configured table name prefix, possibly empty.
    fn prefix(&self) -> &str;

    /// Names of all tables present in the database.
    fn table_list(&self) -> Result<Vec<String>>;

    /// Ordered column metadata for a table.
    fn table_columns(&self, table: &str) -> Result<Vec<Column>>;

    /// Key metadata for a table, one entry per (key, column) pair.
    fn table_keys(&self, table: &str) -> Result<Vec<Key>>;

    fn quote_name(&self, name: &str) -> String;

    fn quote_value(&self, value: &str) -> String;

    /// Fetch all rows of a table (`SELECT *`), stringified.
    fn fetch_rows(&self, table: &str) -> Result<Vec<Row>>;

    /// Execute one statement to completion.
    fn execute(&self, sql: &str) -> Result<()>;
}
