//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Token};
use crate::unicode::is_ident_continue;
use crate::Lexer;
use loxc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers match `[A-Za-z_][A-Za-z0-9_]*` (spec.md §4.1). After
    /// reading the identifier, checks it against the keyword table.
    ///
    /// # Returns
    ///
    /// Either a keyword token (e.g. `Token::Fun`) or `Token::Ident(symbol)`.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text, self.extra_features)
            .unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loxc_util::Handler;

    fn lex_ident(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_identifier()
    }

    #[test]
    fn test_simple_identifier() {
        assert_eq!(lex_ident("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn test_identifier_with_underscore() {
        assert_eq!(
            lex_ident("foo_bar_123"),
            Token::Ident(Symbol::intern("foo_bar_123"))
        );
    }

    #[test]
    fn test_keyword_var() {
        assert_eq!(lex_ident("var"), Token::Var);
    }

    #[test]
    fn test_keyword_fun() {
        assert_eq!(lex_ident("fun"), Token::Fun);
    }

    #[test]
    fn test_keyword_if() {
        assert_eq!(lex_ident("if"), Token::If);
    }

    #[test]
    fn test_keyword_else() {
        assert_eq!(lex_ident("else"), Token::Else);
    }

    #[test]
    fn test_keyword_while() {
        assert_eq!(lex_ident("while"), Token::While);
    }

    #[test]
    fn test_keyword_for() {
        assert_eq!(lex_ident("for"), Token::For);
    }

    #[test]
    fn test_keyword_class() {
        assert_eq!(lex_ident("class"), Token::Class);
    }

    #[test]
    fn test_keyword_true_false_nil() {
        assert_eq!(lex_ident("true"), Token::True);
        assert_eq!(lex_ident("false"), Token::False);
        assert_eq!(lex_ident("nil"), Token::Nil);
    }

    #[test]
    fn test_keyword_return() {
        assert_eq!(lex_ident("return"), Token::Return);
    }

    #[test]
    fn test_keyword_break_continue() {
        assert_eq!(lex_ident("break"), Token::Break);
        assert_eq!(lex_ident("continue"), Token::Continue);
    }

    #[test]
    fn test_keyword_this_super() {
        assert_eq!(lex_ident("this"), Token::This);
        assert_eq!(lex_ident("super"), Token::Super);
    }

    #[test]
    fn test_keyword_and_or() {
        assert_eq!(lex_ident("and"), Token::And);
        assert_eq!(lex_ident("or"), Token::Or);
    }

    #[test]
    fn test_keyword_print() {
        assert_eq!(lex_ident("print"), Token::Print);
    }

    #[test]
    fn test_keyword_static_get_set() {
        assert_eq!(lex_ident("static"), Token::Static);
        assert_eq!(lex_ident("get"), Token::Get);
        assert_eq!(lex_ident("set"), Token::Set);
    }

    #[test]
    fn test_case_sensitivity() {
        assert_eq!(lex_ident("Var"), Token::Ident(Symbol::intern("Var")));
        assert_eq!(lex_ident("IF"), Token::Ident(Symbol::intern("IF")));
    }

    #[test]
    fn test_init_is_plain_identifier() {
        assert_eq!(lex_ident("init"), Token::Ident(Symbol::intern("init")));
    }
}
