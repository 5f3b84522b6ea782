//! The per-table metadata load: introspect, fetch DDL, parse, assemble

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::{
    FirstColumnPrimaryKey, PrimaryKeyPolicy, SchemaSource, SqlTypeMapper, TypeMapper,
};
use crate::error::{error_chain, DbMetaError};
use crate::parser::parse_ddl;
use crate::LoadOptions;

use super::{assemble_table, TableMeta};

/// Minimum number of tables to benefit from parallel loading.
const PARALLEL_THRESHOLD: usize = 8;

type BoxedTypeMapper = Box<dyn TypeMapper + Send + Sync>;
type BoxedKeyPolicy = Box<dyn PrimaryKeyPolicy + Send + Sync>;

/// Loads `TableMeta` values from a schema source.
///
/// Defaults to [`SqlTypeMapper`] and [`FirstColumnPrimaryKey`]; both can be
/// replaced.
pub struct MetaLoader<S> {
    source: S,
    types: BoxedTypeMapper,
    fallback: BoxedKeyPolicy,
    options: LoadOptions,
}

impl<S: SchemaSource> MetaLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            types: Box::new(SqlTypeMapper),
            fallback: Box::new(FirstColumnPrimaryKey),
            options: LoadOptions::default(),
        }
    }

    pub fn with_type_mapper(mut self, types: impl TypeMapper + Send + Sync + 'static) -> Self {
        self.types = Box::new(types);
        self
    }

    pub fn with_fallback_policy(
        mut self,
        fallback: impl PrimaryKeyPolicy + Send + Sync + 'static,
    ) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load metadata for one table.
    ///
    /// Failing to introspect the columns or to fetch the DDL aborts the load;
    /// everything after that only degrades individual fields.
    pub fn load(&self, table: &str) -> Result<TableMeta, DbMetaError> {
        let generic = self
            .source
            .generic_columns(table)
            .map_err(|source| DbMetaError::IntrospectionFailure {
                table: table.to_string(),
                source,
            })?;

        let ddl = self
            .source
            .fetch_ddl(table)
            .map_err(|source| DbMetaError::FetchFailure {
                table: table.to_string(),
                source,
            })?;

        let parsed = parse_ddl(&ddl);
        for warning in parsed.warnings() {
            debug!("{}: {}", table, error_chain(&warning));
        }
        debug!(
            "Parsed `{}`: {} column clauses, {} primary key columns, {} unique indexes",
            table,
            parsed.columns.len(),
            parsed.primary_keys.len(),
            parsed.unique_indexes.len()
        );

        let meta = assemble_table(
            table,
            ddl,
            &parsed,
            &generic,
            &self.source,
            self.types.as_ref(),
            &self.options,
        );

        if self.options.apply_fallback_primary_key && meta.primary_keys.is_empty() {
            return Ok(self.fallback.choose_fallback(meta));
        }
        Ok(meta)
    }
}

impl<S: SchemaSource + Sync> MetaLoader<S> {
    /// Load several tables; results keep the order of `tables`.
    ///
    /// Each table is independent, so larger batches are loaded in parallel.
    pub fn load_all(&self, tables: &[String]) -> Vec<Result<TableMeta, DbMetaError>> {
        if tables.len() >= PARALLEL_THRESHOLD {
            tables.par_iter().map(|table| self.load(table)).collect()
        } else {
            tables.iter().map(|table| self.load(table)).collect()
        }
    }
}
