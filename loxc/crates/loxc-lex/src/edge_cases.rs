//! Edge case tests for loxc-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};
    use loxc_util::Handler;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn test_edge_single_char_ident() {
        let t = lex_all("x");
        assert_eq!(t[0], Token::Ident(loxc_util::Symbol::intern("x")));
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("var {} = 1;", name));
        assert!(t.contains(&Token::Ident(loxc_util::Symbol::intern(&name))));
    }

    #[test]
    fn test_edge_keywords_not_idents() {
        let t = lex_all("fun var if");
        assert_eq!(t[0], Token::Fun);
        assert_eq!(t[1], Token::Var);
        assert_eq!(t[2], Token::If);
    }

    #[test]
    fn test_edge_dot_without_trailing_digit() {
        let t = lex_all("3.");
        assert_eq!(t, vec![Token::Number(3.0), Token::Dot]);
    }

    #[test]
    fn test_edge_empty_string() {
        let t = lex_all("\"\"");
        if let Token::String(s) = &t[0] {
            assert_eq!(s.as_str(), "");
        } else {
            panic!("expected string token");
        }
    }

    #[test]
    fn test_edge_all_operators() {
        let t = lex_all("+ - * / % == != < > <= >= !");
        assert!(t.contains(&Token::Plus));
        assert!(t.contains(&Token::EqEq));
        assert!(t.contains(&Token::Percent));
    }

    #[test]
    fn test_edge_all_delimiters() {
        let t = lex_all("( ) { } [ ] , ; : .");
        assert!(t.contains(&Token::LParen));
        assert!(t.contains(&Token::LBracket));
        assert!(t.contains(&Token::Colon));
    }

    #[test]
    fn test_edge_nested_parens() {
        let t = lex_all("((()))");
        assert_eq!(t.iter().filter(|x| **x == Token::LParen).count(), 3);
    }

    #[test]
    fn test_edge_case_sensitivity() {
        let t = lex_all("Var var");
        assert_eq!(t[0], Token::Ident(loxc_util::Symbol::intern("Var")));
        assert_eq!(t[1], Token::Var);
    }

    #[test]
    fn test_edge_bools_and_nil() {
        let t = lex_all("true false nil");
        assert_eq!(t[0], Token::True);
        assert_eq!(t[1], Token::False);
        assert_eq!(t[2], Token::Nil);
    }

    #[test]
    fn test_edge_this_and_super() {
        let t = lex_all("this super");
        assert_eq!(t[0], Token::This);
        assert_eq!(t[1], Token::Super);
    }

    #[test]
    fn test_edge_ternary_tokens() {
        let t = lex_all("a ? b : c");
        assert!(t.contains(&Token::Question));
        assert!(t.contains(&Token::Colon));
    }

    #[test]
    fn test_edge_all_keywords() {
        let t = lex_all(
            "print var true false nil if else and or while for fun return class this super break continue static get set",
        );
        assert!(t.contains(&Token::Print));
        assert!(t.contains(&Token::Class));
        assert!(t.contains(&Token::Static));
        assert!(t.contains(&Token::Get));
        assert!(t.contains(&Token::Set));
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_err_unterminated_string() {
        let mut h = Handler::new();
        let _ = Lexer::new("\"unterminated", &mut h).next_token();
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_illegal_char() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("@#$", &mut h);
        while lex.next_token() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_mixed_valid_invalid() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("var x = # 1;", &mut h);
        while lex.next_token() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn test_edge_whitespace_variations() {
        let t = lex_all("var\tx\n=\n1");
        assert!(t.contains(&Token::Var));
        assert!(t.contains(&Token::Number(1.0)));
    }

    #[test]
    fn test_edge_leading_zeros() {
        assert!(!lex_all("007").is_empty());
    }

    #[test]
    fn test_edge_comment_preserved_as_token() {
        let t = lex_all("// a comment\nvar x;");
        assert!(matches!(t[0], Token::Comment(_)));
        assert_eq!(t[1], Token::Var);
    }

    #[test]
    fn test_edge_init_is_not_a_keyword() {
        let t = lex_all("init");
        assert_eq!(t[0], Token::Ident(loxc_util::Symbol::intern("init")));
    }
}
