//! rust-dbmeta: table metadata from MySQL `SHOW CREATE TABLE` output
//!
//! Generic schema introspection reports column names, types and
//! nullability, but not primary-key order, unique-index membership,
//! auto-increment or unsigned flags, or inline comments. This library reads
//! those from the DDL text the server emits and merges them with the
//! introspected column list into one [`TableMeta`] per table.

pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

pub use catalog::{DdlCatalog, SchemaSource};
pub use error::DbMetaError;
pub use model::{ColumnMeta, GenericColumn, MetaLoader, TableMeta};
pub use report::OutputFormat;

/// Options for assembling table metadata
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Prefix put in front of the canonical type of unsigned columns
    pub unsigned_prefix: String,
    /// Ask the source for the real length of char/text columns
    pub refine_char_length: bool,
    /// Give tables without a primary key a nominal one
    pub apply_fallback_primary_key: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            unsigned_prefix: "u".to_string(),
            refine_char_length: true,
            apply_fallback_primary_key: true,
        }
    }
}

/// Options for inspecting DDL files
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// A `.sql` file or a directory of them
    pub input_path: PathBuf,
    /// Glob filter applied inside a directory input
    pub include: Option<String>,
    pub load: LoadOptions,
}

/// Load metadata for every table in the DDL files under `options.input_path`.
///
/// Each file holds one `SHOW CREATE TABLE` statement. The table name comes
/// from its `CREATE TABLE` line, or the file stem if that line is missing.
pub fn inspect(options: &InspectOptions) -> Result<Vec<TableMeta>> {
    // Step 1: Find the DDL files
    let files = source::collect_ddl_files(&options.input_path, options.include.as_deref())?;
    info!("Found {} DDL files", files.len());

    // Step 2: Register each file's DDL under its table name
    let mut catalog = DdlCatalog::new();
    let mut tables = Vec::with_capacity(files.len());
    for file in &files {
        let ddl = source::read_ddl_file(file)?;
        let table = match parser::parse_ddl(&ddl).table_name {
            Some(name) => name,
            None => file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("table")
                .to_string(),
        };
        debug!("{} -> table `{}`", file.display(), table);

        if catalog.insert(table.clone(), ddl).is_some() {
            anyhow::bail!("table `{}` is defined by more than one file", table);
        }
        tables.push(table);
    }

    // Step 3: Load metadata for each table
    let loader = MetaLoader::new(&catalog).with_options(options.load.clone());
    let mut loaded = Vec::with_capacity(tables.len());
    for (table, result) in tables.iter().zip(loader.load_all(&tables)) {
        loaded.push(result.with_context(|| format!("while inspecting table `{}`", table))?);
    }

    info!("Loaded metadata for {} tables", loaded.len());
    Ok(loaded)
}
