//! Collaborators the metadata loader depends on.
//!
//! The loader never talks to a database itself. Everything that would need
//! a connection (the DDL fetch, column introspection, length and default
//! lookups) sits behind [`SchemaSource`]; type mapping and the fallback key
//! choice are separate, pure seams.

mod ddl_catalog;
mod defaults;
mod primary_key;
mod type_mapper;

pub use ddl_catalog::DdlCatalog;
pub use defaults::clean_default;
pub use primary_key::{FirstColumnPrimaryKey, PrimaryKeyPolicy};
pub use type_mapper::{is_character_type, MappedType, SqlTypeMapper, TypeMapper};

use anyhow::Result;

use crate::model::GenericColumn;

/// Access to one database's schema.
pub trait SchemaSource {
    /// Raw `SHOW CREATE TABLE` text for `table`.
    fn fetch_ddl(&self, table: &str) -> Result<String>;

    /// Introspected columns of `table`; their order is the ordinal order.
    fn generic_columns(&self, table: &str) -> Result<Vec<GenericColumn>>;

    /// Character length of a char/text column. Failure is not fatal.
    fn lookup_char_length(&self, table: &str, column: &str) -> Result<u64>;

    /// Raw default value bytes, `None` when the column has no default.
    fn lookup_default(&self, table: &str, column: &str) -> Option<Vec<u8>>;

    /// Normalize raw default bytes for output.
    fn clean_default(&self, raw: &[u8]) -> String {
        clean_default(raw)
    }
}

impl<T: SchemaSource + ?Sized> SchemaSource for &T {
    fn fetch_ddl(&self, table: &str) -> Result<String> {
        (**self).fetch_ddl(table)
    }

    fn generic_columns(&self, table: &str) -> Result<Vec<GenericColumn>> {
        (**self).generic_columns(table)
    }

    fn lookup_char_length(&self, table: &str, column: &str) -> Result<u64> {
        (**self).lookup_char_length(table, column)
    }

    fn lookup_default(&self, table: &str, column: &str) -> Option<Vec<u8>> {
        (**self).lookup_default(table, column)
    }

    fn clean_default(&self, raw: &[u8]) -> String {
        (**self).clean_default(raw)
    }
}
