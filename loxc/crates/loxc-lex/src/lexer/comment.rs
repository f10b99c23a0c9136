//! Comment lexing.
//!
//! Lox has only single-line `//` comments (spec.md §3); there is no block
//! comment form. The comment body becomes a `Token::Comment` lexeme rather
//! than being silently discarded, so a parser configured to preserve
//! comments can attach them to the AST (spec.md §3 `Comment`,
//! `CommentedStmt`).

use crate::token::Token;
use crate::Lexer;
use loxc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a `//` line comment, returning its body (without the leading
    /// `//` or the trailing newline) as `Token::Comment`.
    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();

        if self.cursor.match_char('/') {
            let start = self.cursor.position();
            while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                self.cursor.advance();
            }
            let body = self.cursor.slice_from(start);
            return Token::Comment(Symbol::intern(body));
        }

        if self.cursor.match_char('=') {
            // Division-assignment is not part of Lox; `/` followed by `=`
            // lexes as two separate tokens, so back off the `=`.
            self.report_error("unexpected character '='".to_string());
        }

        Token::Slash
    }
}
