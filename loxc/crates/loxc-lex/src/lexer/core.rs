//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and its core methods.

use loxc_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for the Lox programming language.
///
/// The lexer transforms source code text into a stream of tokens. It
/// handles whitespace, comments, identifiers, keywords, and literals.
/// Malformed input never halts tokenization: an illegal byte or an
/// unterminated literal produces `Token::Illegal` with a diagnostic, and
/// scanning continues (spec.md §4.1, §7).
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub cursor: Cursor<'a>,

    /// Error handler for reporting lexical errors.
    pub handler: &'a mut Handler,

    /// Starting position of the current token (byte offset).
    pub token_start: usize,

    /// Line number where the current token starts (1-based).
    token_start_line: u32,

    /// Column number where the current token starts (1-based).
    token_start_column: u32,

    /// Whether the BOM (Byte Order Mark) has been checked.
    pub bom_checked: bool,

    /// The "extra features" flag of spec.md §9: enables `break`,
    /// `continue`, `static`, `get`, `set`, `%`, `?`, `:`, `[`, `]`, and
    /// string escapes. Disabling it yields a strictly smaller language.
    pub extra_features: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code, with extra features enabled.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            bom_checked: false,
            extra_features: true,
        }
    }

    /// Creates a new lexer with the "extra features" flag explicitly set.
    pub fn with_extra_features(source: &'a str, handler: &'a mut Handler, extra_features: bool) -> Self {
        let mut lexer = Self::new(source, handler);
        lexer.extra_features = extra_features;
        lexer
    }

    /// Returns the next token from the source code.
    ///
    /// This is the main entry point for tokenization. It skips whitespace,
    /// then dispatches to the appropriate lexing method based on the
    /// current character.
    ///
    /// # Returns
    /// The next token in the source stream, or `Token::Eof` at end of file.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_bom();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                Token::LParen
            },
            ')' => {
                self.cursor.advance();
                Token::RParen
            },
            '{' => {
                self.cursor.advance();
                Token::LBrace
            },
            '}' => {
                self.cursor.advance();
                Token::RBrace
            },
            '[' if self.extra_features => {
                self.cursor.advance();
                Token::LBracket
            },
            ']' if self.extra_features => {
                self.cursor.advance();
                Token::RBracket
            },
            ',' => {
                self.cursor.advance();
                Token::Comma
            },
            ';' => {
                self.cursor.advance();
                Token::Semicolon
            },
            '+' => {
                self.cursor.advance();
                Token::Plus
            },
            '-' => {
                self.cursor.advance();
                Token::Minus
            },
            '*' => {
                self.cursor.advance();
                Token::Star
            },
            '/' => self.lex_slash(),
            '%' if self.extra_features => {
                self.cursor.advance();
                Token::Percent
            },
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '?' if self.extra_features => {
                self.cursor.advance();
                Token::Question
            },
            ':' if self.extra_features => {
                self.cursor.advance();
                Token::Colon
            },
            '.' => self.lex_dot(),
            '"' => self.lex_string(),
            c if crate::unicode::is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c => {
                self.report_error(format!("illegal character '{}'", c));
                self.cursor.advance();
                Token::Illegal(c.to_string())
            },
        }
    }

    /// Reports a lexical error at the current token position.
    ///
    /// # Arguments
    /// * `message` - The error message to display
    pub fn report_error(&mut self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message)
            .span(span)
            .emit(self.handler);
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte position in the source.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the starting position of the current token.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Returns the span of the most recently lexed token.
    pub fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Lexes equals, equals-equals.
    ///
    /// Handles: `=`, `==`
    fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Eq
        }
    }

    /// Lexes bang or not-equals.
    ///
    /// Handles: `!`, `!=`
    fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::NotEq
        } else {
            Token::Bang
        }
    }

    /// Lexes less or less-equals.
    ///
    /// Handles: `<`, `<=`
    fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::LtEq
        } else {
            Token::Lt
        }
    }

    /// Lexes greater or greater-equals.
    ///
    /// Handles: `>`, `>=`
    fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::GtEq
        } else {
            Token::Gt
        }
    }

    /// Lexes dot. A `.` is consumed here only as a bare symbol; a `.`
    /// immediately following digits is handled inside `lex_number`.
    ///
    /// Handles: `.`
    fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        Token::Dot
    }

    fn skip_whitespace_and_bom(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with('\u{FEFF}') {
                self.cursor.advance();
            }
        }

        while !self.cursor.is_at_end() {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                _ => break,
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token == Token::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loxc_util::Handler;

    fn first_token(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        lexer.next_token()
    }

    #[test]
    fn test_simple_delimiters() {
        assert_eq!(first_token("("), Token::LParen);
        assert_eq!(first_token(")"), Token::RParen);
        assert_eq!(first_token("{"), Token::LBrace);
        assert_eq!(first_token("}"), Token::RBrace);
        assert_eq!(first_token(","), Token::Comma);
        assert_eq!(first_token(";"), Token::Semicolon);
    }

    #[test]
    fn test_brackets_require_extra_features() {
        assert_eq!(first_token("["), Token::LBracket);

        let mut handler = Handler::new();
        let mut lexer = Lexer::with_extra_features("[", &mut handler, false);
        assert!(matches!(lexer.next_token(), Token::Illegal(_)));
    }

    #[test]
    fn test_extra_feature_symbols_gated() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::with_extra_features("%?:", &mut handler, false);
        assert!(matches!(lexer.next_token(), Token::Illegal(_)));
        assert!(matches!(lexer.next_token(), Token::Illegal(_)));
        assert!(matches!(lexer.next_token(), Token::Illegal(_)));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("", &mut handler);
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn test_bom_skipped() {
        assert_eq!(first_token("\u{FEFF}print"), Token::Print);
    }

    #[test]
    fn test_illegal_char_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new("#", &mut handler);
        let token = lexer.next_token();
        assert!(matches!(token, Token::Illegal(_)));
        assert!(handler.has_errors());
    }
}
