//! Line splitting and classification for `SHOW CREATE TABLE` output.
//!
//! MySQL emits the statement with one column or index definition per line:
//!
//! ```sql
//! CREATE TABLE `users` (
//!   `id` int(10) unsigned NOT NULL AUTO_INCREMENT,
//!   `email` varchar(255) NOT NULL,
//!   PRIMARY KEY (`id`),
//!   UNIQUE KEY `uq_email` (`email`)
//! ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
//! ```
//!
//! Lines are trimmed and classified by their leading text only; the
//! extractors decide what to do with each kind.

/// Delimiter around identifiers in MySQL DDL.
pub const QUOTE: char = '`';

/// Classification of one trimmed DDL line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank lines, `CREATE TABLE ... (` and lines opening or closing the column list
    Ignorable,
    /// Starts with a quoted identifier
    ColumnDefinition,
    /// Starts with `PRIMARY KEY`
    PrimaryKey,
    /// Starts with `UNIQUE KEY`
    UniqueKey,
    /// Anything else (`KEY`, `CONSTRAINT ... FOREIGN KEY`, `FULLTEXT KEY`, ...)
    Other,
}

/// A trimmed DDL line with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdlLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

/// Classify a trimmed line.
///
/// An empty line is checked first so that no branch ever inspects the first
/// character of an empty string.
pub fn classify_line(line: &str) -> LineKind {
    if line.is_empty() {
        return LineKind::Ignorable;
    }

    if line.starts_with("CREATE TABLE") || line.starts_with('(') || line.starts_with(')') {
        LineKind::Ignorable
    } else if line.starts_with(QUOTE) {
        LineKind::ColumnDefinition
    } else if line.starts_with("PRIMARY KEY") {
        LineKind::PrimaryKey
    } else if line.starts_with("UNIQUE KEY") {
        LineKind::UniqueKey
    } else {
        LineKind::Other
    }
}

/// Split DDL text into trimmed, classified lines.
pub fn tokenize_lines(ddl: &str) -> impl Iterator<Item = DdlLine<'_>> {
    ddl.lines().enumerate().map(|(i, raw)| {
        let text = raw.trim();
        DdlLine {
            number: i + 1,
            text,
            kind: classify_line(text),
        }
    })
}

/// Find the next identifier delimiter at or after byte offset `from`.
///
/// Returns `None` when no delimiter remains (or `from` is past the end),
/// which callers treat as the end of the identifiers on that line.
pub fn find_delimiter(line: &str, from: usize) -> Option<usize> {
    line.get(from..)?.find(QUOTE).map(|idx| idx + from)
}

/// Extract the quoted identifier whose opening delimiter is at or after
/// `from`. Returns the identifier and the offset just past its closing
/// delimiter.
pub fn quoted_identifier_at(line: &str, from: usize) -> Option<(&str, usize)> {
    let open = find_delimiter(line, from)?;
    let close = find_delimiter(line, open + 1)?;
    Some((&line[open + 1..close], close + 1))
}
