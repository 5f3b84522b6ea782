//! Column attributes read from a column's clause text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker MySQL emits for auto-increment columns. Matched case-sensitively.
pub const AUTO_INCREMENT_MARKER: &str = "AUTO_INCREMENT";

/// `COMMENT '...'` up to the first closing quote. An escaped quote inside
/// the comment ends the match early.
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"COMMENT '(.*?)'").expect("Invalid comment regex"));

/// Attributes derived from one column clause
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAttributes {
    pub is_auto_increment: bool,
    pub is_unsigned: bool,
    /// Inline comment; empty when the clause has none
    pub comment: String,
}

pub fn detect_attributes(clause: &str) -> ColumnAttributes {
    ColumnAttributes {
        is_auto_increment: is_auto_increment(clause),
        is_unsigned: is_unsigned(clause),
        comment: extract_comment(clause).unwrap_or_default(),
    }
}

pub fn is_auto_increment(clause: &str) -> bool {
    clause.contains(AUTO_INCREMENT_MARKER)
}

/// `unsigned` as a whitespace-delimited token, all-lowercase or all-uppercase.
pub fn is_unsigned(clause: &str) -> bool {
    clause
        .split(|c: char| c.is_whitespace() || c == ',')
        .any(|word| word == "unsigned" || word == "UNSIGNED")
}

pub fn extract_comment(clause: &str) -> Option<String> {
    COMMENT_RE
        .captures(clause)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
