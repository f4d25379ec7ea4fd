//! XML snapshot writer

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Result, SqlPortError};
use crate::schema::{Document, Table};

/// Serialize a document to its XML snapshot form.
///
/// The whole document is buffered; downstream consumers expect one atomic
/// artifact.
pub fn write_document(document: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let root = BytesStart::new("dump")
        .with_attributes([("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")]);
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("database")))?;

    for table in &document.tables {
        if table.has_structure() {
            write_structure(&mut writer, table)?;
        }
        if !table.rows.is_empty() {
            write_data(&mut writer, table)?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("database")))?;
    writer.write_event(Event::End(BytesEnd::new("dump")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| SqlPortError::Xml {
        message: e.to_string(),
    })
}

fn write_structure<W: Write>(writer: &mut Writer<W>, table: &Table) -> Result<()> {
    let start =
        BytesStart::new("table_structure").with_attributes([("name", table.name.as_str())]);
    writer.write_event(Event::Start(start))?;

    for column in &table.columns {
        let mut field = BytesStart::new("field");
        field.push_attribute(("Field", column.name.as_str()));
        field.push_attribute(("Type", column.data_type.as_str()));
        field.push_attribute(("Null", if column.nullable { "YES" } else { "NO" }));
        field.push_attribute(("Key", column.key.as_token()));
        // Absent attribute means no default (NULL).
        if let Some(default) = &column.default {
            field.push_attribute(("Default", default.as_str()));
        }
        field.push_attribute(("Extra", column.extra.as_str()));
        field.push_attribute(("Comment", column.comment.as_str()));
        writer.write_event(Event::Empty(field))?;
    }

    for key in &table.keys {
        let sequence = key.sequence.to_string();
        let mut entry = BytesStart::new("key");
        entry.push_attribute(("Table", key.table.as_str()));
        entry.push_attribute(("Non_unique", if key.non_unique { "1" } else { "0" }));
        entry.push_attribute(("Key_name", key.name.as_str()));
        entry.push_attribute(("Seq_in_index", sequence.as_str()));
        entry.push_attribute(("Column_name", key.column.as_str()));
        entry.push_attribute(("Collation", key.collation.as_str()));
        entry.push_attribute(("Null", key.nullable.as_str()));
        entry.push_attribute(("Index_type", key.index_type.as_str()));
        entry.push_attribute(("Comment", key.comment.as_str()));
        entry.push_attribute(("Index_comment", key.index_comment.as_str()));
        writer.write_event(Event::Empty(entry))?;
    }

    writer.write_event(Event::End(BytesEnd::new("table_structure")))?;
    Ok(())
}

fn write_data<W: Write>(writer: &mut Writer<W>, table: &Table) -> Result<()> {
    let start = BytesStart::new("table_data").with_attributes([("name", table.name.as_str())]);
    writer.write_event(Event::Start(start))?;

    for row in &table.rows {
        writer.write_event(Event::Start(BytesStart::new("row")))?;
        for (name, value) in row {
            let field = BytesStart::new("field").with_attributes([("name", name.as_str())]);
            writer.write_event(Event::Start(field))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new("field")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("table_data")))?;
    Ok(())
}
