use common::err::{CResult, CoreError, MalformedSqlKind};

use crate::token::{Token, TokenKind};

/// Delimiter value that means "no semicolon delimiter active": reserved for
/// use while a `DELIMITER` command's own body is being scanned.
pub const NO_DELIMITER: &str = "\0";

/// Byte-level(-ish; operates on validated UTF-8) lexer. Recognizes string
/// and identifier literals, comments (including the `/*!NNNNN ... */`
/// conditional-execution form), a configurable runtime delimiter, and a
/// command-mode flag used while scanning `USE`/`DELIMITER` bodies.
pub struct Lexer<'a> {
    input: &'a str,
    path: String,
    pos: usize,
    line: usize,
    column: usize,
    pub delimiter: String,
    pub command_mode: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(path: impl Into<String>, input: &'a str) -> Self {
        Lexer {
            input,
            path: path.into(),
            pos: 0,
            line: 1,
            column: 1,
            delimiter: ";".to_string(),
            command_mode: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Consume the UTF-8 byte-order mark at absolute offset 0, if present,
    /// returning the token span. Must be called before any other token is
    /// emitted.
    pub fn consume_leading_bom(&mut self) -> Option<Token> {
        if self.pos == 0 && self.input.starts_with('\u{feff}') {
            let tok = Token {
                kind: TokenKind::Filler,
                start: 0,
                end: 3,
                line: 1,
                column: 0,
            };
            self.pos = 3;
            // Column counting resumes fresh for the "real" content.
            self.column = 1;
            Some(tok)
        } else {
            None
        }
    }

    fn advance(&mut self, len_bytes: usize) {
        for ch in self.input[self.pos..self.pos + len_bytes].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len_bytes;
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> CResult<Option<Token>> {
        if self.at_eof() {
            return Ok(None);
        }

        if let Some(tok) = self.scan_filler()? {
            return Ok(Some(tok));
        }

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        if self.delimiter != NO_DELIMITER && self.rest().starts_with(self.delimiter.as_str()) {
            let len = self.delimiter.len();
            self.advance(len);
            return Ok(Some(Token {
                kind: TokenKind::Delimiter,
                start,
                end: self.pos,
                line: start_line,
                column: start_col,
            }));
        }

        // Command mode: a bare newline also terminates the statement.
        if self.command_mode && self.rest().starts_with('\n') {
            self.advance(1);
            return Ok(Some(Token {
                kind: TokenKind::Delimiter,
                start,
                end: self.pos,
                line: start_line,
                column: start_col,
            }));
        }

        let first = self.rest().chars().next().unwrap();

        let kind = if first == '\'' || first == '"' {
            self.scan_quoted(first, MalformedSqlKind::UnterminatedString)?;
            TokenKind::Str
        } else if first == '`' {
            self.scan_quoted('`', MalformedSqlKind::UnterminatedIdentifier)?;
            TokenKind::Identifier
        } else if first.is_ascii_digit() {
            self.scan_number();
            TokenKind::Number
        } else if is_word_start(first) {
            self.scan_word();
            TokenKind::Word
        } else {
            self.advance(first.len_utf8());
            TokenKind::Symbol
        };

        Ok(Some(Token {
            kind,
            start,
            end: self.pos,
            line: start_line,
            column: start_col,
        }))
    }

    /// Merge contiguous whitespace/comment runs into a single Filler token.
    fn scan_filler(&mut self) -> CResult<Option<Token>> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }
            let ch = rest.chars().next().unwrap();
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else if rest.starts_with('#') {
                self.consume_line_comment();
            } else if rest.starts_with("-- ") || rest == "--" {
                self.consume_line_comment();
            } else if rest.starts_with("/*") {
                self.consume_block_comment(start_line, start_col)?;
            } else {
                break;
            }
        }

        if self.pos == start {
            Ok(None)
        } else {
            Ok(Some(Token {
                kind: TokenKind::Filler,
                start,
                end: self.pos,
                line: start_line,
                column: start_col,
            }))
        }
    }

    fn consume_line_comment(&mut self) {
        while let Some(ch) = self.rest().chars().next() {
            if ch == '\n' {
                break;
            }
            self.advance(ch.len_utf8());
        }
    }

    fn consume_block_comment(&mut self, start_line: usize, start_col: usize) -> CResult<()> {
        self.advance(2); // "/*"
        loop {
            if self.rest().is_empty() {
                return Err(CoreError::MalformedSql {
                    path: self.path.clone(),
                    line: start_line,
                    column: start_col,
                    kind: MalformedSqlKind::UnterminatedComment,
                });
            }
            if self.rest().starts_with("*/") {
                self.advance(2);
                return Ok(());
            }
            let ch = self.rest().chars().next().unwrap();
            self.advance(ch.len_utf8());
        }
    }

    fn scan_quoted(&mut self, quote: char, err_kind: MalformedSqlKind) -> CResult<()> {
        let start_line = self.line;
        let start_col = self.column;
        self.advance(quote.len_utf8());

        let allows_backslash_escape = quote != '`';

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(CoreError::MalformedSql {
                    path: self.path.clone(),
                    line: start_line,
                    column: start_col,
                    kind: err_kind,
                });
            }
            let ch = rest.chars().next().unwrap();
            if allows_backslash_escape && ch == '\\' {
                self.advance(1);
                if let Some(next) = self.rest().chars().next() {
                    self.advance(next.len_utf8());
                }
                continue;
            }
            if ch == quote {
                // Doubled quote char escapes to a literal quote.
                let after = &rest[ch.len_utf8()..];
                if after.starts_with(quote) {
                    self.advance(ch.len_utf8() * 2);
                    continue;
                }
                self.advance(ch.len_utf8());
                return Ok(());
            }
            self.advance(ch.len_utf8());
        }
    }

    fn scan_number(&mut self) {
        let mut seen_dot = false;
        while let Some(ch) = self.rest().chars().next() {
            if ch.is_ascii_digit() {
                self.advance(1);
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                self.advance(1);
            } else {
                break;
            }
        }
    }

    fn scan_word(&mut self) {
        while let Some(ch) = self.rest().chars().next() {
            if is_word_continue(ch) {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_word_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}
