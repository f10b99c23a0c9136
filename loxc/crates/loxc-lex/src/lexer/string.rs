//! String literal lexing.

use crate::token::Token;
use crate::unicode::parse_hex_byte;
use crate::Lexer;
use loxc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a string literal.
    ///
    /// Consumes until a matching `"` or EOF/newline, processing escape
    /// sequences (`\n`, `\t`, `\\`, `\"`, `\xHH`) along the way. An
    /// unterminated string (EOF or newline before the closing quote)
    /// produces `Token::Illegal` with a single diagnostic (spec.md §4.1,
    /// §8). Escapes are only processed when the "extra features" flag is
    /// set; otherwise a backslash is copied through literally.
    ///
    /// # Returns
    ///
    /// `Token::String(symbol)` with the processed string content, or
    /// `Token::Illegal` if the literal was unterminated.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                return Token::Illegal("unterminated string literal".to_string());
            }

            let c = self.cursor.current_char();

            if c == '"' {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                self.report_error("unterminated string literal".to_string());
                return Token::Illegal("unterminated string literal".to_string());
            }

            if c == '\\' && self.extra_features {
                self.cursor.advance();
                if let Some(escaped) = self.parse_escape() {
                    content.push(escaped);
                }
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        Token::String(Symbol::intern(&content))
    }

    /// Parses an escape sequence.
    ///
    /// Handles: `\n`, `\t`, `\\`, `\"`, `\xHH`. Anything else is an
    /// illegal escape, diagnosed but not fatal: scanning continues
    /// (spec.md §4.1).
    ///
    /// # Returns
    ///
    /// The escaped character, or `None` on error.
    fn parse_escape(&mut self) -> Option<char> {
        if self.cursor.is_at_end() {
            self.report_error("unterminated escape sequence".to_string());
            return None;
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            'x' => {
                let mut hex = String::new();
                for _ in 0..2 {
                    let h = self.cursor.current_char();
                    if h.is_ascii_hexdigit() {
                        hex.push(h);
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
                match parse_hex_byte(&hex) {
                    Some(byte) => Some(byte as char),
                    None => {
                        self.report_error("invalid hex escape sequence".to_string());
                        None
                    },
                }
            },
            _ => {
                self.report_error(format!("invalid escape sequence: \\{}", c));
                None
            },
        }
    }
}
