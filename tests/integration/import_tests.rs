//! Integration tests for the importer

use sqlport::dialect::DialectKind;
use sqlport::logging::LogLevel;
use sqlport::schema::Table;
use sqlport::{new_dialect, DatabaseImporter, SqlPortError};

use crate::common::{column, key, primary_column, MockConnector, RecordingLog};

const ITEMS_DOC: &str = r##"<?xml version="1.0"?>
<dump xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
 <database>
  <table_structure name="#__items">
   <field Field="id" Type="int(11)" Null="NO" Key="PRI" Extra="" Comment=""/>
   <field Field="name" Type="text" Null="YES" Key="" Extra="" Comment=""/>
   <key Table="#__items" Non_unique="0" Key_name="PRIMARY" Seq_in_index="1" Column_name="id" Collation="A" Null="" Index_type="BTREE" Comment="" Index_comment=""/>
  </table_structure>
  <table_data name="#__items">
   <row>
    <field name="id">1</field>
    <field name="name">first</field>
   </row>
   <row>
    <field name="id">2</field>
    <field name="name">second</field>
   </row>
  </table_data>
 </database>
</dump>"##;

#[test]
fn test_end_to_end_create_then_insert() {
    let connector = MockConnector::empty(DialectKind::Mysql).with_prefix("jos_");
    let log = RecordingLog::default();

    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .connector(&connector)
        .set_source(ITEMS_DOC)
        .unwrap()
        .with_structure(true)
        .with_data(true)
        .logger(Box::new(log.clone()));

    let summary = importer.process().unwrap();
    assert_eq!(summary.statements_executed, 3);

    let executed = connector.executed();
    assert_eq!(executed.len(), 3);
    assert!(executed[0].starts_with("CREATE TABLE `jos_items`"));
    assert!(executed[1].starts_with("INSERT INTO `jos_items`"));
    assert!(executed[1].contains("'1', 'first'"));
    assert!(executed[2].contains("'2', 'second'"));

    // Each statement is logged at debug level before execution.
    let entries = log.entries();
    assert_eq!(entries.len(), 3);
    for (entry, sql) in entries.iter().zip(executed.iter()) {
        assert_eq!(entry.0, LogLevel::Debug);
        assert_eq!(&entry.1, sql);
    }
}

#[test]
fn test_failing_statement_aborts_the_run() {
    let connector = MockConnector::empty(DialectKind::Mysql).failing_on("INSERT");
    let log = RecordingLog::default();

    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .connector(&connector)
        .set_source(ITEMS_DOC)
        .unwrap()
        .with_data(true)
        .logger(Box::new(log.clone()));

    let err = importer.process().unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::Statement { sql, .. } if sql.starts_with("INSERT")));

    // Only the CREATE went through; nothing after the failing INSERT ran.
    let executed = connector.executed();
    assert_eq!(executed.len(), 1);
    assert!(executed[0].starts_with("CREATE TABLE"));

    // The failing statement is logged twice: debug before execution, error
    // on failure. The second INSERT is never logged.
    let entries = log.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].0, LogLevel::Debug);
    assert_eq!(entries[2].0, LogLevel::Error);
    assert_eq!(entries[1].1, entries[2].1);
}

#[test]
fn test_unsupported_operation_executes_nothing() {
    // The live table differs in a column type, which needs a change-column
    // operation the sqlite dialect cannot render.
    let live = Table {
        name: "#__items".to_string(),
        columns: vec![primary_column("id", "bigint(20)"), column("name", "text")],
        keys: vec![key("#__items", "PRIMARY", 1, "id", false)],
        rows: Vec::new(),
    };
    let connector = MockConnector::with_tables(DialectKind::Sqlite, vec![live]);

    let importer = DatabaseImporter::new(new_dialect(DialectKind::Sqlite))
        .connector(&connector)
        .set_source(ITEMS_DOC)
        .unwrap();

    let err = importer.process().unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::Unsupported { .. }));
    assert!(connector.executed().is_empty());
}

#[test]
fn test_matching_structure_is_a_no_op() {
    let live = Table {
        name: "#__items".to_string(),
        columns: vec![primary_column("id", "int(11)"), column("name", "text")],
        keys: vec![key("#__items", "PRIMARY", 1, "id", false)],
        rows: Vec::new(),
    };
    let connector = MockConnector::with_tables(DialectKind::Mysql, vec![live]);

    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .connector(&connector)
        .set_source(ITEMS_DOC)
        .unwrap();

    let summary = importer.process().unwrap();
    assert_eq!(summary.statements_executed, 0);
    assert!(connector.executed().is_empty());
}

#[test]
fn test_missing_connector_is_a_precondition_error() {
    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .set_source(ITEMS_DOC)
        .unwrap();

    let err = importer.process().unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::Precondition { .. }));
}

#[test]
fn test_connector_dialect_mismatch_is_a_precondition_error() {
    let connector = MockConnector::empty(DialectKind::Sqlite);
    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .connector(&connector)
        .set_source(ITEMS_DOC)
        .unwrap();

    let err = importer.process().unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::Precondition { .. }));
}

#[test]
fn test_missing_source_is_a_precondition_error() {
    let connector = MockConnector::empty(DialectKind::Mysql);
    let importer = DatabaseImporter::new(new_dialect(DialectKind::Mysql)).connector(&connector);

    let err = importer.process().unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::Precondition { .. }));
}

#[test]
fn test_invalid_source_is_rejected_at_parse_time() {
    let err = DatabaseImporter::new(new_dialect(DialectKind::Mysql))
        .set_source("<dump><database>")
        .unwrap_err();
    let err = err.downcast_ref::<SqlPortError>().unwrap();
    assert!(matches!(err, SqlPortError::InvalidDocument { .. }));
}
