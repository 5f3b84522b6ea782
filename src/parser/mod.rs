//! `SHOW CREATE TABLE` parsing

mod attributes;
mod column_clause;
mod constraint_parser;
mod ddl_tokenizer;
mod token_scanner;

use std::collections::BTreeMap;

use tracing::debug;

pub use attributes::{
    detect_attributes, extract_comment, is_auto_increment, is_unsigned, ColumnAttributes,
    AUTO_INCREMENT_MARKER,
};
pub use column_clause::{
    extract_column_clause, parse_clause_definition, ClauseDefinition, ColumnClause,
    ColumnClauses,
};
pub use constraint_parser::{
    parse_primary_key_tokens, parse_unique_key_tokens, TokenParsedUniqueKey,
};
pub use ddl_tokenizer::{
    classify_line, find_delimiter, quoted_identifier_at, tokenize_lines, DdlLine, LineKind,
    QUOTE,
};

use crate::error::DbMetaError;

/// A constraint line that was skipped because it could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the DDL text
    pub line: usize,
    pub text: String,
}

impl From<&SkippedLine> for DbMetaError {
    fn from(skipped: &SkippedLine) -> Self {
        DbMetaError::MalformedConstraintLine {
            line: skipped.line,
            text: skipped.text.clone(),
        }
    }
}

/// Everything recovered from one DDL text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDdl {
    /// Name from the `CREATE TABLE` line, if present
    pub table_name: Option<String>,
    /// Column name to clause text, in DDL order
    pub columns: ColumnClauses,
    /// Primary key columns in declaration order
    pub primary_keys: Vec<String>,
    /// Unique index name to member columns in declaration order.
    /// A repeated index name replaces the earlier entry.
    pub unique_indexes: BTreeMap<String, Vec<String>>,
    /// Constraint lines that were malformed and contributed nothing
    pub skipped: Vec<SkippedLine>,
}

impl ParsedDdl {
    /// Non-fatal problems found while parsing.
    pub fn warnings(&self) -> Vec<DbMetaError> {
        self.skipped.iter().map(DbMetaError::from).collect()
    }
}

/// Parse `SHOW CREATE TABLE` output.
///
/// A pure function of its input: no columns, no primary key or no unique
/// index are all valid results, represented by empty containers.
pub fn parse_ddl(ddl: &str) -> ParsedDdl {
    let mut parsed = ParsedDdl::default();

    for line in tokenize_lines(ddl) {
        match line.kind {
            LineKind::Ignorable => {
                if parsed.table_name.is_none() && line.text.starts_with("CREATE TABLE") {
                    parsed.table_name =
                        quoted_identifier_at(line.text, 0).map(|(name, _)| name.to_string());
                }
            }
            LineKind::ColumnDefinition => {
                if let Some(col) = extract_column_clause(line.text) {
                    if parsed.columns.insert(col.name.clone(), col.clause).is_some() {
                        debug!("Column `{}` declared twice; keeping the later clause", col.name);
                    }
                }
            }
            LineKind::PrimaryKey => match parse_primary_key_tokens(line.text) {
                Some(columns) => parsed.primary_keys.extend(columns),
                None => skip(&mut parsed, &line),
            },
            LineKind::UniqueKey => match parse_unique_key_tokens(line.text) {
                Some(key) => {
                    parsed.unique_indexes.insert(key.name, key.columns);
                }
                None => skip(&mut parsed, &line),
            },
            LineKind::Other => {}
        }
    }

    parsed
}

fn skip(parsed: &mut ParsedDdl, line: &DdlLine<'_>) {
    debug!("Skipping malformed constraint at line {}: {}", line.number, line.text);
    parsed.skipped.push(SkippedLine {
        line: line.number,
        text: line.text.to_string(),
    });
}
