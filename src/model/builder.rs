//! Assemble table metadata from introspected columns and parsed DDL
//!
//! Ordinal positions come from the introspected column list, never from DDL
//! line order. Key and index members that name a column the introspection
//! did not report are dropped silently.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::catalog::{is_character_type, SchemaSource, TypeMapper};
use crate::error::{error_chain, DbMetaError};
use crate::parser::{detect_attributes, ParsedDdl};
use crate::LoadOptions;

use super::{ColumnMeta, GenericColumn, TableMeta};

const UNSIGNED_NOTE: &str = "column is set for unsigned";

/// Merge introspected columns with parsed DDL into a `TableMeta`.
///
/// Default values, character lengths and types come from `source` and
/// `types`. A failed length lookup is logged and the mapper's length kept.
/// No fallback primary key is applied here.
pub fn assemble_table(
    table_name: &str,
    ddl: String,
    parsed: &ParsedDdl,
    generic: &[GenericColumn],
    source: &dyn SchemaSource,
    types: &dyn TypeMapper,
    options: &LoadOptions,
) -> TableMeta {
    let mut columns = Vec::with_capacity(generic.len());

    for (index, col) in generic.iter().enumerate() {
        let column_ddl = parsed.columns.get(&col.name).unwrap_or_default();
        let attrs = detect_attributes(column_ddl);
        let mapped = types.map_native_type(&col.native_type);

        let mut meta = ColumnMeta {
            index,
            name: col.name.clone(),
            nullable: col.nullable.unwrap_or(false),
            database_type_name: col.native_type.clone(),
            column_type: mapped.canonical,
            column_len: mapped.length,
            is_primary_key: parsed.primary_keys.iter().any(|pk| pk == &col.name),
            is_auto_increment: attrs.is_auto_increment,
            is_unsigned: attrs.is_unsigned,
            default_value: source
                .lookup_default(table_name, &col.name)
                .map(|raw| source.clean_default(&raw))
                .unwrap_or_default(),
            comment: attrs.comment,
            notes: String::new(),
            column_ddl: column_ddl.to_string(),
        };

        if meta.is_unsigned {
            meta.column_type = format!("{}{}", options.unsigned_prefix, meta.column_type);
            meta.push_note(UNSIGNED_NOTE);
        }

        if options.refine_char_length && is_character_type(&meta.column_type) {
            match source.lookup_char_length(table_name, &col.name) {
                Ok(len) => meta.column_len = Some(len),
                Err(cause) => {
                    let err = DbMetaError::LengthLookupFailure {
                        table: table_name.to_string(),
                        column: col.name.clone(),
                        source: cause,
                    };
                    warn!("{}, keeping mapped length", error_chain(&err));
                }
            }
        }

        columns.push(meta);
    }

    let positions: HashMap<&str, usize> = columns
        .iter()
        .map(|c: &ColumnMeta| (c.name.as_str(), c.index))
        .collect();
    let resolve = |names: &[String]| -> Vec<usize> {
        names
            .iter()
            .filter_map(|n| positions.get(n.as_str()).copied())
            .collect()
    };

    let primary_keys = resolve(parsed.primary_keys.as_slice());
    let unique_indexes: BTreeMap<String, Vec<usize>> = parsed
        .unique_indexes
        .iter()
        .map(|(name, members)| (name.clone(), resolve(members.as_slice())))
        .collect();

    TableMeta {
        table_name: table_name.to_string(),
        ddl,
        columns,
        primary_keys,
        unique_indexes,
    }
}
