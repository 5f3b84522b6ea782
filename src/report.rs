//! Human-readable and JSON reports of loaded table metadata

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::model::{ColumnMeta, TableMeta};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON view of a table: keys and indexes by column name
#[derive(Debug, Serialize)]
struct TableReport<'a> {
    table: &'a str,
    columns: &'a [ColumnMeta],
    primary_key: Vec<&'a str>,
    unique_indexes: BTreeMap<&'a str, Vec<&'a str>>,
}

impl<'a> From<&'a TableMeta> for TableReport<'a> {
    fn from(table: &'a TableMeta) -> Self {
        Self {
            table: &table.table_name,
            columns: &table.columns,
            primary_key: names(table.primary_key_columns()),
            unique_indexes: table
                .unique_index_groups()
                .map(|(name, cols)| (name, names(cols)))
                .collect(),
        }
    }
}

fn names<'a>(columns: Vec<&'a ColumnMeta>) -> Vec<&'a str> {
    columns.into_iter().map(|c| c.name.as_str()).collect()
}

/// Render tables as a pretty-printed JSON array.
pub fn render_json(tables: &[TableMeta]) -> serde_json::Result<String> {
    let reports: Vec<TableReport<'_>> = tables.iter().map(TableReport::from).collect();
    serde_json::to_string_pretty(&reports)
}

/// Render one table as a text report.
pub fn render_text(table: &TableMeta) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== Table `{}` ===", table.table_name);
    let _ = writeln!(out);

    let _ = writeln!(out, "Columns ({}):", table.columns.len());
    if table.columns.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for col in &table.columns {
        let len = col.column_len.map(|l| format!("({})", l)).unwrap_or_default();
        let _ = write!(
            out,
            "  {:>3}  {:<24} {}{}",
            col.index + 1,
            col.name,
            col.column_type,
            len
        );

        let mut flags = Vec::new();
        if col.is_primary_key {
            flags.push("PK");
        }
        if col.is_auto_increment {
            flags.push("AUTO_INCREMENT");
        }
        if !col.nullable {
            flags.push("NOT NULL");
        }
        if !flags.is_empty() {
            let _ = write!(out, "  [{}]", flags.join(", "));
        }
        if !col.default_value.is_empty() {
            let _ = write!(out, "  default={}", col.default_value);
        }
        if !col.comment.is_empty() {
            let _ = write!(out, "  -- {}", col.comment);
        }
        let _ = writeln!(out);
        if !col.notes.is_empty() {
            let _ = writeln!(out, "       note: {}", col.notes);
        }
    }
    let _ = writeln!(out);

    let primary_key = names(table.primary_key_columns());
    if primary_key.is_empty() {
        let _ = writeln!(out, "Primary key: (none)");
    } else {
        let _ = writeln!(out, "Primary key: ({})", primary_key.join(", "));
    }

    let _ = writeln!(out, "Unique indexes ({}):", table.unique_indexes.len());
    if table.unique_indexes.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (name, cols) in table.unique_index_groups() {
        let _ = writeln!(out, "  {} ({})", name, names(cols).join(", "));
    }

    out
}
