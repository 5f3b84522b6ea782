//! Fallback primary key for tables that declare none

use tracing::warn;

use crate::model::TableMeta;

/// Picks a nominal primary key for a table without one.
///
/// Only called when no assembled column is a primary key.
pub trait PrimaryKeyPolicy {
    fn choose_fallback(&self, table: TableMeta) -> TableMeta;
}

/// Marks the first column (ordinal 0) as the primary key.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstColumnPrimaryKey;

impl PrimaryKeyPolicy for FirstColumnPrimaryKey {
    fn choose_fallback(&self, mut table: TableMeta) -> TableMeta {
        let table_name = table.table_name.clone();
        let Some(first) = table.columns.first_mut() else {
            return table;
        };

        let note = format!(
            "table `{}` has no primary key defined, using column `{}` at position 1",
            table_name, first.name
        );
        warn!("{}", note);

        first.is_primary_key = true;
        first.push_note(&note);
        table.primary_keys = vec![first.index];
        table
    }
}
