//! Structural diffing
//!
//! Compares a desired table definition against the live database's current
//! structure and produces an ordered list of DDL operations. Pure functions
//! over two immutable snapshots; no hidden mutation.
//!
//! Emission order: column changes, column drops, column adds, then key
//! operations — so a key referencing a just-added column is valid when
//! created.

use crate::schema::{key_lookup, Column, Key, Table};

/// One structural operation, to be rendered by a dialect generator.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOp {
    CreateTable(Table),
    AddColumn { table: String, column: Column },
    ChangeColumn { table: String, column: Column },
    DropColumn { table: String, column: String },
    AddKey { table: String, keys: Vec<Key> },
    DropKey { table: String, name: String },
}

/// Diff a desired table definition against the current live structure of the
/// same (prefix-resolved) table.
pub fn diff_table(desired: &Table, current: &Table) -> Vec<TableOp> {
    let table = desired.name.as_str();
    let mut ops = Vec::new();
    let mut adds = Vec::new();
    let mut matched: Vec<&str> = Vec::new();

    for column in &desired.columns {
        match current.column(&column.name) {
            Some(existing) => {
                matched.push(column.name.as_str());
                if column.differs_from(existing) {
                    ops.push(TableOp::ChangeColumn {
                        table: table.to_string(),
                        column: column.clone(),
                    });
                }
            }
            None => adds.push(TableOp::AddColumn {
                table: table.to_string(),
                column: column.clone(),
            }),
        }
    }

    // Current columns never matched by a desired column are orphans.
    for column in &current.columns {
        if !matched.contains(&column.name.as_str()) {
            ops.push(TableOp::DropColumn {
                table: table.to_string(),
                column: column.name.clone(),
            });
        }
    }

    ops.extend(adds);
    ops.extend(diff_keys(table, &desired.keys, &current.keys));
    ops
}

/// Diff the key sets of a table, grouped by key name.
fn diff_keys(table: &str, desired: &[Key], current: &[Key]) -> Vec<TableOp> {
    let desired_lookup = key_lookup(desired);
    let current_lookup = key_lookup(current);
    let mut ops = Vec::new();
    let mut matched: Vec<&str> = Vec::new();

    for (name, group) in &desired_lookup {
        match current_lookup.iter().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                matched.push(name.as_str());
                if !group_matches(group, existing) {
                    // Keys are never altered in place; drop and recreate.
                    ops.push(TableOp::DropKey {
                        table: table.to_string(),
                        name: name.clone(),
                    });
                    ops.push(add_key_op(table, group));
                }
            }
            None => ops.push(add_key_op(table, group)),
        }
    }

    // Remaining current groups are orphans. The primary key is deliberately
    // never dropped by this path; an explicit drop_primary_key call is the
    // only way to remove one.
    for (name, _) in &current_lookup {
        if matched.contains(&name.as_str()) || name.eq_ignore_ascii_case("PRIMARY") {
            continue;
        }
        ops.push(TableOp::DropKey {
            table: table.to_string(),
            name: name.clone(),
        });
    }

    ops
}

/// A key group matches only if both sides have the same cardinality and every
/// entry pair agrees in sequence order.
fn group_matches(desired: &[&Key], current: &[&Key]) -> bool {
    desired.len() == current.len()
        && desired
            .iter()
            .zip(current.iter())
            .all(|(d, c)| d.matches(c))
}

fn add_key_op(table: &str, group: &[&Key]) -> TableOp {
    TableOp::AddKey {
        table: table.to_string(),
        keys: group.iter().map(|k| (*k).clone()).collect(),
    }
}
