//! Column-definition lines: name and trailing clause text.
//!
//! ```sql
//! `id` int(10) unsigned NOT NULL AUTO_INCREMENT COMMENT 'id field',
//! ```
//!
//! yields the name `id` and the clause
//! ` int(10) unsigned NOT NULL AUTO_INCREMENT COMMENT 'id field'`.

use std::collections::HashMap;

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use super::ddl_tokenizer::quoted_identifier_at;
use super::token_scanner::LineScanner;

/// A column name with the raw clause text that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClause {
    pub name: String,
    pub clause: String,
}

/// Column clauses of one table, in DDL order.
///
/// Merge policy: inserting a name that is already present replaces its
/// clause in place (last wins) and keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClauses {
    entries: Vec<ColumnClause>,
    by_name: HashMap<String, usize>,
}

impl ColumnClauses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clause, returning the clause it replaced, if any.
    pub fn insert(&mut self, name: String, clause: String) -> Option<String> {
        match self.by_name.get(&name) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].clause, clause)),
            None => {
                self.by_name.insert(name.clone(), self.entries.len());
                self.entries.push(ColumnClause { name, clause });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&idx| self.entries[idx].clause.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnClause> {
        self.entries.iter()
    }
}

/// Split a column-definition line into its name and clause text.
///
/// The clause runs from just past the name's closing delimiter to the end
/// of the line, minus the trailing comma separating it from the next
/// definition. Returns `None` if the line has no complete quoted name.
pub fn extract_column_clause(line: &str) -> Option<ColumnClause> {
    let (name, clause_start) = quoted_identifier_at(line, 0)?;
    let rest = &line[clause_start..];
    let clause = rest.strip_suffix(',').unwrap_or(rest);

    Some(ColumnClause {
        name: name.to_string(),
        clause: clause.to_string(),
    })
}

/// What a clause says about the column itself, read from its tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseDefinition {
    /// Type as written, with its arguments (e.g. `varchar(255)`, `decimal(10,2)`)
    pub native_type: String,
    /// `false` only when the clause says `NOT NULL`
    pub nullable: bool,
    /// `DEFAULT` literal in SQL source form; `None` for no default or `DEFAULT NULL`
    pub default_literal: Option<String>,
}

/// Read the type, nullability and default literal from a clause.
///
/// Returns `None` if the clause does not tokenize or has no type word.
pub fn parse_clause_definition(clause: &str) -> Option<ClauseDefinition> {
    let mut scanner = LineScanner::new(clause)?;
    scanner.skip_whitespace();

    let mut native_type = scanner.parse_word()?;
    if let Some(args) = scanner.consume_parenthesized() {
        native_type.push_str(&args);
    }

    let mut result = ClauseDefinition {
        native_type,
        nullable: true,
        default_literal: None,
    };

    while !scanner.is_at_end() {
        scanner.skip_whitespace();
        if scanner.expect_keyword(Keyword::NOT).is_some() {
            scanner.skip_whitespace();
            if scanner.expect_keyword(Keyword::NULL).is_some() {
                result.nullable = false;
            }
        } else if scanner.expect_keyword(Keyword::DEFAULT).is_some() {
            scanner.skip_whitespace();
            result.default_literal = scanner.parse_literal();
            // DEFAULT (expr) on MySQL 8
            if result.default_literal.is_none() && scanner.check_token(&Token::LParen) {
                result.default_literal = scanner.consume_parenthesized();
            }
        } else {
            scanner.advance();
        }
    }

    Some(result)
}
