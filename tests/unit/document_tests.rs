//! Unit tests for the document codec

use pretty_assertions::assert_eq;

use sqlport::document::{parse_document, write_document};
use sqlport::schema::{Column, Document, Key, KeyRole, Table};

fn snapshot() -> Document {
    let mut users = Table::new("#__users");
    users.columns.push(Column {
        name: "id".to_string(),
        data_type: "int(11)".to_string(),
        nullable: false,
        key: KeyRole::Primary,
        default: None,
        extra: "auto_increment".to_string(),
        comment: String::new(),
    });
    users.columns.push(Column {
        name: "name".to_string(),
        data_type: "varchar(150)".to_string(),
        nullable: true,
        key: KeyRole::None,
        default: Some(String::new()),
        extra: String::new(),
        comment: "display name".to_string(),
    });
    users.keys.push(Key {
        table: "#__users".to_string(),
        non_unique: false,
        name: "PRIMARY".to_string(),
        sequence: 1,
        column: "id".to_string(),
        collation: "A".to_string(),
        nullable: String::new(),
        index_type: "BTREE".to_string(),
        comment: String::new(),
        index_comment: String::new(),
    });
    users.rows.push(vec![
        ("id".to_string(), "1".to_string()),
        ("name".to_string(), "<admin> & \"friends\"".to_string()),
    ]);

    Document {
        tables: vec![users],
    }
}

#[test]
fn test_document_round_trip() {
    let original = snapshot();
    let xml = write_document(&original).unwrap();
    let parsed = parse_document(&xml).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_writer_escapes_row_values() {
    let xml = write_document(&snapshot()).unwrap();
    assert!(xml.contains("&lt;admin&gt; &amp;"));
    assert!(!xml.contains("<admin>"));
}

#[test]
fn test_writer_omits_absent_default() {
    let xml = write_document(&snapshot()).unwrap();
    // The id column has no default; the name column has an empty one.
    let id_line = xml
        .lines()
        .find(|line| line.contains("Field=\"id\""))
        .unwrap();
    assert!(!id_line.contains("Default="));
    let name_line = xml
        .lines()
        .find(|line| line.contains("Field=\"name\""))
        .unwrap();
    assert!(name_line.contains("Default=\"\""));
}

#[test]
fn test_writer_emits_data_section_only_with_rows() {
    let mut document = snapshot();
    document.tables[0].rows.clear();
    let xml = write_document(&document).unwrap();
    assert!(xml.contains("<table_structure name=\"#__users\">"));
    assert!(!xml.contains("<table_data"));
}

#[test]
fn test_round_trip_preserves_row_order_and_values() {
    let mut document = snapshot();
    document.tables[0].rows.push(vec![
        ("id".to_string(), "2".to_string()),
        ("name".to_string(), String::new()),
    ]);

    let xml = write_document(&document).unwrap();
    let parsed = parse_document(&xml).unwrap();

    let rows = &parsed.tables[0].rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1].1, "<admin> & \"friends\"");
    assert_eq!(rows[1][0].1, "2");
    assert_eq!(rows[1][1].1, "");
}
