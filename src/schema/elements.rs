//! Schema model element types
//!
//! In-memory representation of table structure and row data, independent of
//! any SQL dialect. Values are built fresh for each export or diff operation
//! and compared structurally, never by identity.

/// Placeholder token for the storage-layer table name prefix.
///
/// Documents carry table names with this token in place of the live prefix,
/// so the same snapshot can be imported into databases with different
/// prefixes.
pub const PREFIX_WILDCARD: &str = "#__";

/// Role a column plays in the table's keys, as reported by the source engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    Indexed,
}

impl KeyRole {
    /// The document token for this role ("", "PRI", "UNI", "MUL").
    pub fn as_token(&self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Primary => "PRI",
            KeyRole::Unique => "UNI",
            KeyRole::Indexed => "MUL",
        }
    }

    /// Parse a document token. Unknown tokens are treated as no key role.
    pub fn from_token(token: &str) -> Self {
        match token {
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Indexed,
            _ => KeyRole::None,
        }
    }
}

/// A single table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Raw source type string, e.g. "tinyint(11) unsigned".
    pub data_type: String,
    pub nullable: bool,
    pub key: KeyRole,
    /// Default value; `None` means no default (NULL).
    pub default: Option<String>,
    /// Raw modifier string, e.g. "auto_increment".
    pub extra: String,
    pub comment: String,
}

impl Column {
    /// Whether this column definition differs from `other` in a way that
    /// requires a change-column operation.
    ///
    /// Compares type, nullability, default and extra modifiers. Comments are
    /// not compared. An absent default and an empty-string default are
    /// considered equal.
    pub fn differs_from(&self, other: &Column) -> bool {
        self.data_type != other.data_type
            || self.nullable != other.nullable
            || self.default.as_deref().unwrap_or("") != other.default.as_deref().unwrap_or("")
            || self.extra != other.extra
    }
}

/// One entry of an index or constraint.
///
/// A composite key is represented by several entries sharing one `name`,
/// ordered by `sequence` (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Owning table name.
    pub table: String,
    pub non_unique: bool,
    /// Key name; "PRIMARY" is reserved for the primary key.
    pub name: String,
    /// 1-based position of this column within the key.
    pub sequence: u32,
    pub column: String,
    pub collation: String,
    /// Nullability marker of the indexed column ("" or "YES").
    pub nullable: String,
    pub index_type: String,
    pub comment: String,
    pub index_comment: String,
}

impl Key {
    pub fn is_primary(&self) -> bool {
        self.name.eq_ignore_ascii_case("PRIMARY")
    }

    /// Whether this entry matches `other` for diffing purposes.
    ///
    /// Compares the non-unique flag, column name, sequence, collation and
    /// index type. Comment text is not compared.
    pub fn matches(&self, other: &Key) -> bool {
        self.non_unique == other.non_unique
            && self.column == other.column
            && self.sequence == other.sequence
            && self.collation == other.collation
            && self.index_type == other.index_type
    }
}

/// One data row: an ordered mapping of column name to scalar value.
pub type Row = Vec<(String, String)>;

/// A table definition with optional row data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub keys: Vec<Key>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            ..Table::default()
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the table carries a structure definition (not just row data).
    pub fn has_structure(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// The intermediate document: a self-describing snapshot of zero or more
/// tables, each optionally carrying row data. This is the only artifact that
/// crosses the export/import boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tables: Vec<Table>,
}

impl Document {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Resolve the wildcard prefix in all table names against a live prefix.
    ///
    /// Applied once when a document is bound to a connection; the rest of the
    /// engine only ever sees resolved names.
    pub fn resolve_prefix(&self, prefix: &str) -> Document {
        let mut resolved = self.clone();
        for table in &mut resolved.tables {
            table.name = real_table_name(&table.name, prefix);
            for key in &mut table.keys {
                key.table = real_table_name(&key.table, prefix);
            }
        }
        resolved
    }
}

/// Group key entries by key name, preserving first-seen order of names and
/// in-group entry order.
pub fn key_lookup(keys: &[Key]) -> Vec<(String, Vec<&Key>)> {
    let mut lookup: Vec<(String, Vec<&Key>)> = Vec::new();
    for key in keys {
        match lookup.iter_mut().find(|(name, _)| *name == key.name) {
            Some((_, group)) => group.push(key),
            None => lookup.push((key.name.clone(), vec![key])),
        }
    }
    lookup
}

/// Convert a real table name to its generic form, replacing the configured
/// prefix with the wildcard token.
pub fn generic_table_name(table: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return table.to_string();
    }
    match table.strip_prefix(prefix) {
        Some(rest) => format!("{}{}", PREFIX_WILDCARD, rest),
        None => table.to_string(),
    }
}

/// Convert a generic table name to its real form, replacing the wildcard
/// token with the configured prefix.
pub fn real_table_name(table: &str, prefix: &str) -> String {
    match table.strip_prefix(PREFIX_WILDCARD) {
        Some(rest) => format!("{}{}", prefix, rest),
        None => table.to_string(),
    }
}
