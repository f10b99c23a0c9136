//! loxc-lex - Lexical analyzer for the Lox programming language.
//!
//! Transforms UTF-8 source text into a stream of [`Token`]s (spec.md §3,
//! §4.1). The lexer is pull-style: callers call [`Lexer::next_token`]
//! repeatedly until an [`Token::Eof`] is returned, after which it keeps
//! returning `Eof`. Malformed input never aborts scanning — an illegal
//! byte, an unterminated string, or a bad escape sequence is reported to
//! the injected [`loxc_util::Handler`] as a diagnostic and lexing
//! continues with an `Illegal` token (spec.md §7).
//!
//! # Example
//!
//! ```
//! use loxc_lex::{Lexer, Token};
//! use loxc_util::Handler;
//!
//! let mut handler = Handler::new();
//! let mut lexer = Lexer::new("print 1 + 2;", &mut handler);
//!
//! assert_eq!(lexer.next_token(), Token::Print);
//! assert_eq!(lexer.next_token(), Token::Number(1.0));
//! assert_eq!(lexer.next_token(), Token::Plus);
//! assert_eq!(lexer.next_token(), Token::Number(2.0));
//! assert_eq!(lexer.next_token(), Token::Semicolon);
//! assert_eq!(lexer.next_token(), Token::Eof);
//! assert!(!handler.has_errors());
//! ```

pub mod cursor;
#[cfg(test)]
mod edge_cases;
mod lexer;
mod sanitize;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use sanitize::sanitize_utf8;
pub use token::{keyword_from_ident, Token};

#[cfg(test)]
mod proptests {
    use super::*;
    use loxc_util::Handler;
    use proptest::prelude::*;

    /// Lexing arbitrary bytes never panics and always terminates at `Eof`
    /// (spec.md §4.1: illegal input is diagnosed, not fatal).
    #[test]
    fn never_panics_on_arbitrary_input() {
        proptest!(|(source in "\\PC*")| {
            let mut handler = Handler::new();
            let mut lexer = Lexer::new(&source, &mut handler);
            let mut guard = 0;
            loop {
                guard += 1;
                prop_assert!(guard < 1_000_000, "lexer did not reach Eof");
                if lexer.next_token() == Token::Eof {
                    break;
                }
            }
        });
    }

    /// Any run of ASCII identifier characters not matching a keyword lexes
    /// back to the same text as `Token::Ident`.
    #[test]
    fn ident_round_trips() {
        proptest!(|(name in "[a-zA-Z_][a-zA-Z0-9_]{0,15}")| {
            prop_assume!(keyword_from_ident(&name, true).is_none());
            let mut handler = Handler::new();
            let mut lexer = Lexer::new(&name, &mut handler);
            let token = lexer.next_token();
            match token {
                Token::Ident(sym) => prop_assert_eq!(sym.as_str(), name.as_str()),
                other => prop_assert!(false, "expected Ident, got {:?}", other),
            }
            prop_assert!(!handler.has_errors());
        });
    }

    /// A plain non-negative integer literal round-trips through `f64`
    /// without loss for the magnitudes produced here.
    #[test]
    fn integer_literal_round_trips() {
        proptest!(|(n in 0u32..1_000_000)| {
            let source = n.to_string();
            let mut handler = Handler::new();
            let mut lexer = Lexer::new(&source, &mut handler);
            prop_assert_eq!(lexer.next_token(), Token::Number(n as f64));
        });
    }
}
