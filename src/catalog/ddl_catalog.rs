//! A schema source backed by DDL text alone.
//!
//! Used by the CLI and tests where no database is reachable: the generic
//! column list and defaults are read back out of the registered
//! `SHOW CREATE TABLE` text.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};

use super::SchemaSource;
use crate::model::GenericColumn;
use crate::parser::{parse_clause_definition, parse_ddl, ParsedDdl};

/// In-memory `SchemaSource` keyed by table name
#[derive(Debug, Clone, Default)]
pub struct DdlCatalog {
    tables: HashMap<String, String>,
}

impl DdlCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register DDL for a table, returning any DDL it replaced.
    pub fn insert(&mut self, table: impl Into<String>, ddl: impl Into<String>) -> Option<String> {
        self.tables.insert(table.into(), ddl.into())
    }

    /// Register DDL under the name on its `CREATE TABLE` line.
    ///
    /// Returns the table name, or `None` if the text names no table.
    pub fn insert_ddl(&mut self, ddl: impl Into<String>) -> Option<String> {
        let ddl = ddl.into();
        let name = parse_ddl(&ddl).table_name?;
        self.tables.insert(name.clone(), ddl);
        Some(name)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Registered table names, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    fn parsed(&self, table: &str) -> Result<ParsedDdl> {
        Ok(parse_ddl(&self.fetch_ddl(table)?))
    }
}

impl SchemaSource for DdlCatalog {
    fn fetch_ddl(&self, table: &str) -> Result<String> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| anyhow!("no DDL registered for table `{}`", table))
    }

    fn generic_columns(&self, table: &str) -> Result<Vec<GenericColumn>> {
        let parsed = self.parsed(table)?;
        let mut columns = Vec::with_capacity(parsed.columns.len());

        for col in parsed.columns.iter() {
            let def = parse_clause_definition(&col.clause)
                .ok_or_else(|| anyhow!("cannot read type of column `{}`", col.name))?;
            columns.push(GenericColumn {
                name: col.name.clone(),
                nullable: Some(def.nullable),
                native_type: def.native_type,
            });
        }

        Ok(columns)
    }

    fn lookup_char_length(&self, table: &str, column: &str) -> Result<u64> {
        bail!(
            "character length of `{}`.`{}` is not available without a database",
            table,
            column
        )
    }

    fn lookup_default(&self, table: &str, column: &str) -> Option<Vec<u8>> {
        let parsed = self.parsed(table).ok()?;
        let def = parse_clause_definition(parsed.columns.get(column)?)?;
        def.default_literal.map(String::into_bytes)
    }
}
