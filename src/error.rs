//! Error types for rust-dbmeta

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading table metadata
#[derive(Error, Debug)]
pub enum DbMetaError {
    #[error("Failed to fetch DDL for table `{table}`")]
    FetchFailure {
        table: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to introspect columns of table `{table}`")]
    IntrospectionFailure {
        table: String,
        #[source]
        source: anyhow::Error,
    },

    /// Non-fatal: the loader logs it and keeps the type mapper's length.
    #[error("Failed to look up character length of `{table}`.`{column}`")]
    LengthLookupFailure {
        table: String,
        column: String,
        #[source]
        source: anyhow::Error,
    },

    /// Non-fatal: the line is skipped and contributes nothing to the parse.
    #[error("Malformed constraint at DDL line {line}: {text}")]
    MalformedConstraintLine { line: usize, text: String },

    #[error("Failed to read DDL file: {path}")]
    DdlFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("DDL file is neither UTF-8 nor Windows-1252: {path}")]
    DdlDecode { path: PathBuf },

    #[error("No .sql files found under {path}")]
    NoDdlFiles { path: PathBuf },
}

impl DbMetaError {
    /// Whether this error aborts the metadata load for a table.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DbMetaError::LengthLookupFailure { .. } | DbMetaError::MalformedConstraintLine { .. }
        )
    }
}

/// Render an error with its source chain: `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
