//! Token scanner for single DDL lines.
//!
//! `SHOW CREATE TABLE` output puts one column or one index per line, so every
//! extractor in this crate works on one line at a time. `LineScanner` wraps
//! the `sqlparser` tokenizer (MySQL dialect) and gives the extractors a small
//! cursor API over the typed token stream:
//!
//! ```ignore
//! let mut scanner = LineScanner::new("PRIMARY KEY (`a`,`b`)")?;
//! scanner.skip_whitespace();
//! scanner.expect_keyword(Keyword::PRIMARY)?;
//! scanner.skip_whitespace();
//! scanner.expect_keyword(Keyword::KEY)?;
//! let columns = scanner.remaining_quoted_identifiers();
//! ```

use sqlparser::dialect::MySqlDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, TokenWithSpan, Tokenizer};

use super::ddl_tokenizer::QUOTE;

/// Cursor over the tokens of one DDL line.
pub struct LineScanner {
    tokens: Vec<TokenWithSpan>,
    pos: usize,
}

impl LineScanner {
    /// Tokenize a line with the MySQL dialect.
    ///
    /// Returns `None` if tokenization fails, e.g. on an unterminated
    /// backtick identifier or string literal.
    pub fn new(line: &str) -> Option<Self> {
        let dialect = MySqlDialect {};
        let tokens = Tokenizer::new(&dialect, line)
            .tokenize_with_location()
            .ok()?;

        Some(Self { tokens, pos: 0 })
    }

    // ========================================================================
    // Position and state
    // ========================================================================

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn current_token(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            match &token.token {
                Token::Whitespace(_) => self.advance(),
                _ => break,
            }
        }
    }

    // ========================================================================
    // Token checks
    // ========================================================================

    /// Check if current token is a specific (unquoted) keyword.
    #[inline]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(
            self.current_token().map(|t| &t.token),
            Some(Token::Word(w)) if w.keyword == keyword && w.quote_style.is_none()
        )
    }

    /// Check if current token matches a token type (by discriminant).
    #[inline]
    pub fn check_token(&self, expected: &Token) -> bool {
        self.current_token()
            .map(|t| std::mem::discriminant(&t.token) == std::mem::discriminant(expected))
            .unwrap_or(false)
    }

    /// Expect a keyword, advancing if found. Position is unchanged on `None`.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Option<()> {
        if self.check_keyword(keyword) {
            self.advance();
            Some(())
        } else {
            None
        }
    }

    /// Expect `first` followed by `second`, whitespace allowed in between.
    pub fn expect_keyword_pair(&mut self, first: Keyword, second: Keyword) -> Option<()> {
        let start = self.pos;
        self.skip_whitespace();
        if self.expect_keyword(first).is_some() {
            self.skip_whitespace();
            if self.expect_keyword(second).is_some() {
                return Some(());
            }
        }
        self.pos = start;
        None
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Parse a backtick-quoted identifier at the current position.
    pub fn parse_quoted_identifier(&mut self) -> Option<String> {
        match &self.current_token()?.token {
            Token::Word(w) if w.quote_style == Some(QUOTE) => {
                let name = w.value.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        }
    }

    /// Advance to the next backtick-quoted identifier and consume it.
    ///
    /// Returns `None` once no further quoted identifier exists on the line.
    pub fn next_quoted_identifier(&mut self) -> Option<String> {
        while !self.is_at_end() {
            if let Some(name) = self.parse_quoted_identifier() {
                return Some(name);
            }
            self.advance();
        }
        None
    }

    /// Consume every remaining backtick-quoted identifier, in line order.
    pub fn remaining_quoted_identifiers(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.next_quoted_identifier()).collect()
    }

    // ========================================================================
    // Words, literals, and groups
    // ========================================================================

    /// Parse an unquoted word (type names, bare default values).
    pub fn parse_word(&mut self) -> Option<String> {
        match &self.current_token()?.token {
            Token::Word(w) if w.quote_style.is_none() => {
                let value = w.value.clone();
                self.advance();
                Some(value)
            }
            _ => None,
        }
    }

    /// Parse a single literal token and return it in SQL source form.
    ///
    /// Quoted strings keep their quotes (inner quotes doubled), numbers and
    /// bare words are returned as written. `NULL` yields `None`.
    pub fn parse_literal(&mut self) -> Option<String> {
        if self.check_token(&Token::Minus) {
            let start = self.pos;
            self.advance();
            if let Some(Token::Number(n, _)) = self.current_token().map(|t| &t.token) {
                let value = format!("-{}", n);
                self.advance();
                return Some(value);
            }
            self.pos = start;
            return None;
        }

        let literal = match &self.current_token()?.token {
            Token::Word(w) if w.keyword == Keyword::NULL && w.quote_style.is_none() => None,
            Token::SingleQuotedString(s) => Some(format!("'{}'", s.replace('\'', "''"))),
            Token::Whitespace(_) | Token::Comma | Token::EOF => return None,
            other => Some(other.to_string()),
        };
        self.advance();
        literal
    }

    /// Consume a parenthesized group and return it verbatim, parentheses
    /// included. Position must be at `(`; returns `None` otherwise or when
    /// the group is not closed on this line.
    pub fn consume_parenthesized(&mut self) -> Option<String> {
        if !self.check_token(&Token::LParen) {
            return None;
        }

        let start_pos = self.pos;
        let mut depth = 0usize;
        while !self.is_at_end() {
            if self.check_token(&Token::LParen) {
                depth += 1;
            } else if self.check_token(&Token::RParen) {
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return Some(self.tokens_to_string(start_pos, self.pos));
                }
            }
            self.advance();
        }

        self.pos = start_pos;
        None
    }

    /// Concatenate tokens from `start_pos` to `end_pos` (exclusive).
    pub fn tokens_to_string(&self, start_pos: usize, end_pos: usize) -> String {
        self.tokens[start_pos..end_pos]
            .iter()
            .map(|t| t.token.to_string())
            .collect()
    }
}
