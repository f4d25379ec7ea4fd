//! Unit tests for the schema model

use sqlport::schema::{Column, Document, Key, KeyRole, Table};

fn sample_document() -> Document {
    let mut table = Table::new("#__issues");
    table.columns.push(Column {
        name: "id".to_string(),
        data_type: "int(11)".to_string(),
        nullable: false,
        key: KeyRole::Primary,
        default: None,
        extra: "auto_increment".to_string(),
        comment: String::new(),
    });
    table.keys.push(Key {
        table: "#__issues".to_string(),
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
    Document {
        tables: vec![table],
    }
}

#[test]
fn test_resolve_prefix_rewrites_tables_and_keys() {
    let document = sample_document();
    let resolved = document.resolve_prefix("jos_");

    assert_eq!(resolved.tables[0].name, "jos_issues");
    assert_eq!(resolved.tables[0].keys[0].table, "jos_issues");
    // The original snapshot is untouched.
    assert_eq!(document.tables[0].name, "#__issues");
}

#[test]
fn test_resolve_prefix_leaves_real_names_alone() {
    let mut document = sample_document();
    document.tables[0].name = "plain".to_string();
    let resolved = document.resolve_prefix("jos_");
    assert_eq!(resolved.tables[0].name, "plain");
}

#[test]
fn test_key_role_tokens_round_trip() {
    for role in [
        KeyRole::None,
        KeyRole::Primary,
        KeyRole::Unique,
        KeyRole::Indexed,
    ] {
        assert_eq!(KeyRole::from_token(role.as_token()), role);
    }
    assert_eq!(KeyRole::from_token("bogus"), KeyRole::None);
}

#[test]
fn test_primary_key_name_is_case_insensitive() {
    let mut entry = sample_document().tables[0].keys[0].clone();
    entry.name = "primary".to_string();
    assert!(entry.is_primary());
}
