//! Table and column metadata types

use std::collections::BTreeMap;

use serde::Serialize;

/// A column as reported by generic schema introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericColumn {
    pub name: String,
    /// `None` when the driver cannot tell
    pub nullable: Option<bool>,
    /// Type name as reported by the driver (e.g. `varchar(255)`, `UNSIGNED INT`)
    pub native_type: String,
}

/// Assembled metadata for one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMeta {
    /// Ordinal position in the introspected column list
    pub index: usize,
    pub name: String,
    pub nullable: bool,
    /// Native type name from introspection
    pub database_type_name: String,
    /// Canonical type; carries the unsigned prefix for unsigned columns
    pub column_type: String,
    /// Character length or precision, if known
    pub column_len: Option<u64>,
    pub is_primary_key: bool,
    pub is_auto_increment: bool,
    pub is_unsigned: bool,
    /// Cleaned default value; empty when there is none
    pub default_value: String,
    /// Inline `COMMENT '...'`; empty when there is none
    pub comment: String,
    /// Free-text notes added while assembling
    pub notes: String,
    /// Raw clause text from the DDL, for diagnostics
    pub column_ddl: String,
}

impl ColumnMeta {
    /// Append a note, space separated.
    pub fn push_note(&mut self, note: &str) {
        if !self.notes.is_empty() {
            self.notes.push(' ');
        }
        self.notes.push_str(note.trim());
    }
}

/// Assembled metadata for one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableMeta {
    pub table_name: String,
    /// The `SHOW CREATE TABLE` text the metadata was read from
    pub ddl: String,
    /// Columns in introspection order
    pub columns: Vec<ColumnMeta>,
    /// Primary key column positions, in key order
    pub primary_keys: Vec<usize>,
    /// Unique index name to member column positions, in key order
    pub unique_indexes: BTreeMap<String, Vec<usize>>,
}

impl TableMeta {
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns in key order.
    pub fn primary_key_columns(&self) -> Vec<&ColumnMeta> {
        self.resolve(&self.primary_keys)
    }

    /// Member columns of a unique index in key order.
    pub fn unique_index(&self, name: &str) -> Option<Vec<&ColumnMeta>> {
        self.unique_indexes
            .get(name)
            .map(|positions| self.resolve(positions))
    }

    /// Every unique index with its member columns, ordered by index name.
    pub fn unique_index_groups(&self) -> impl Iterator<Item = (&str, Vec<&ColumnMeta>)> + '_ {
        self.unique_indexes
            .iter()
            .map(|(name, positions)| (name.as_str(), self.resolve(positions)))
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&ColumnMeta> {
        positions
            .iter()
            .filter_map(|&pos| self.columns.get(pos))
            .collect()
    }
}
