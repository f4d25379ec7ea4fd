//! Intermediate document codec
//!
//! Serializes the schema model (plus row data) to the XML snapshot format and
//! back. The format is stable across engine versions: a `<dump>` root with a
//! `<database>` child holding one `<table_structure>` section per table and
//! an optional `<table_data>` section per table with rows.

mod reader;
mod writer;

pub use reader::parse_document;
pub use writer::write_document;
