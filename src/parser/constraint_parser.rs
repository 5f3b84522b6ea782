//! Key constraint lines: `PRIMARY KEY` and `UNIQUE KEY`.
//!
//! ```sql
//! PRIMARY KEY (`tenant_id`,`id`),
//! UNIQUE KEY `uq_email` (`email`),
//! UNIQUE KEY `uq_name_prefix` (`last_name`(20),`first_name`) USING BTREE
//! ```
//!
//! Column order inside the parentheses is the key order and is preserved
//! exactly. For `UNIQUE KEY` the first identifier is the index name, so the
//! member walk starts after it has been consumed.

use sqlparser::keywords::Keyword;

use super::token_scanner::LineScanner;

/// A parsed `UNIQUE KEY` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParsedUniqueKey {
    /// Index name
    pub name: String,
    /// Member columns in declaration order
    pub columns: Vec<String>,
}

/// Parse a `PRIMARY KEY (...)` line into its ordered column list.
///
/// Returns `None` for a malformed line: one that does not tokenize (an odd
/// number of delimiters) or that names no columns at all.
pub fn parse_primary_key_tokens(line: &str) -> Option<Vec<String>> {
    let mut scanner = LineScanner::new(line)?;
    scanner.expect_keyword_pair(Keyword::PRIMARY, Keyword::KEY)?;

    let columns = scanner.remaining_quoted_identifiers();
    if columns.is_empty() {
        return None;
    }
    Some(columns)
}

/// Parse a ``UNIQUE KEY `name` (...)`` line.
///
/// The first quoted identifier is the index name; every identifier after it
/// is a member column. Returns `None` when the line does not tokenize or
/// has no index name.
pub fn parse_unique_key_tokens(line: &str) -> Option<TokenParsedUniqueKey> {
    let mut scanner = LineScanner::new(line)?;
    scanner.expect_keyword_pair(Keyword::UNIQUE, Keyword::KEY)?;

    let name = scanner.next_quoted_identifier()?;
    let columns = scanner.remaining_quoted_identifiers();

    Some(TokenParsedUniqueKey { name, columns })
}
