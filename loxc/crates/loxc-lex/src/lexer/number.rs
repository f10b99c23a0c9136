//! Number literal lexing.
//!
//! Lox numbers are a single kind: IEEE-754 doubles written as a digit run
//! with an optional fractional part (spec.md §3, §8). A `.` is only
//! consumed as part of the number when followed by another digit; `3.`
//! lexes as `Number(3.0)` followed by a separate `Dot` token.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal.
    ///
    /// # Returns
    ///
    /// `Token::Number(f64)`.
    pub fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        let text = self.cursor.slice_from(start);
        match text.parse::<f64>() {
            Ok(value) => Token::Number(value),
            Err(e) => {
                self.report_error(format!("invalid number literal '{}': {}", text, e));
                Token::Number(0.0)
            },
        }
    }
}
