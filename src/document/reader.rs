//! XML snapshot reader

use roxmltree::Node;

use crate::error::{Result, SqlPortError};
use crate::schema::{Column, Document, Key, KeyRole, Row, Table};

/// Parse an XML snapshot into a document.
///
/// The root element's name is not checked, so snapshots produced by older
/// engine versions under a different root remain readable; only the
/// `<database>` child is required. `table_structure` and `table_data`
/// sections are merged by table name.
pub fn parse_document(xml: &str) -> Result<Document> {
    let parsed = roxmltree::Document::parse(xml).map_err(|e| SqlPortError::InvalidDocument {
        message: e.to_string(),
    })?;

    let database = parsed
        .root_element()
        .children()
        .find(|n| n.has_tag_name("database"))
        .ok_or_else(|| SqlPortError::invalid_document("missing <database> element"))?;

    let mut document = Document::default();

    for section in database.children().filter(|n| n.is_element()) {
        match section.tag_name().name() {
            "table_structure" => {
                let name = table_name(&section)?;
                let table = table_entry(&mut document, &name);
                read_structure(&section, table)?;
            }
            "table_data" => {
                let name = table_name(&section)?;
                let table = table_entry(&mut document, &name);
                read_data(&section, table)?;
            }
            _ => {}
        }
    }

    Ok(document)
}

fn table_name(section: &Node) -> Result<String> {
    let name = required_attr(section, "name")?;
    if name.is_empty() {
        return Err(SqlPortError::invalid_document("empty table name"));
    }
    Ok(name.to_string())
}

/// Find or create the table entry for a section name.
fn table_entry<'a>(document: &'a mut Document, name: &str) -> &'a mut Table {
    let position = match document.tables.iter().position(|t| t.name == name) {
        Some(position) => position,
        None => {
            document.tables.push(Table::new(name));
            document.tables.len() - 1
        }
    };
    &mut document.tables[position]
}

fn read_structure(section: &Node, table: &mut Table) -> Result<()> {
    for child in section.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "field" => table.columns.push(read_field(&child)?),
            "key" => table.keys.push(read_key(&child)?),
            _ => {}
        }
    }
    Ok(())
}

fn read_field(node: &Node) -> Result<Column> {
    Ok(Column {
        name: required_attr(node, "Field")?.to_string(),
        data_type: required_attr(node, "Type")?.to_string(),
        nullable: node.attribute("Null").unwrap_or("NO") == "YES",
        key: KeyRole::from_token(node.attribute("Key").unwrap_or("")),
        default: node.attribute("Default").map(str::to_string),
        extra: node.attribute("Extra").unwrap_or("").to_string(),
        comment: node.attribute("Comment").unwrap_or("").to_string(),
    })
}

fn read_key(node: &Node) -> Result<Key> {
    let sequence = required_attr(node, "Seq_in_index")?;
    let sequence = sequence.parse::<u32>().map_err(|_| {
        SqlPortError::invalid_document(format!("invalid Seq_in_index: {}", sequence))
    })?;

    Ok(Key {
        table: required_attr(node, "Table")?.to_string(),
        non_unique: required_attr(node, "Non_unique")? != "0",
        name: required_attr(node, "Key_name")?.to_string(),
        sequence,
        column: required_attr(node, "Column_name")?.to_string(),
        collation: node.attribute("Collation").unwrap_or("").to_string(),
        nullable: node.attribute("Null").unwrap_or("").to_string(),
        index_type: node.attribute("Index_type").unwrap_or("").to_string(),
        comment: node.attribute("Comment").unwrap_or("").to_string(),
        index_comment: node.attribute("Index_comment").unwrap_or("").to_string(),
    })
}

fn read_data(section: &Node, table: &mut Table) -> Result<()> {
    for row_node in section.children().filter(|n| n.has_tag_name("row")) {
        let mut row = Row::new();
        for field in row_node.children().filter(|n| n.has_tag_name("field")) {
            let name = required_attr(&field, "name")?.to_string();
            let value = field.text().unwrap_or("").to_string();
            row.push((name, value));
        }
        table.rows.push(row);
    }
    Ok(())
}

fn required_attr<'a>(node: &Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        SqlPortError::invalid_document(format!(
            "<{}> is missing the {} attribute",
            node.tag_name().name(),
            name
        ))
    })
}
