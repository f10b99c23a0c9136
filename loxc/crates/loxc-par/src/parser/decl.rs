//! Declaration parsing: `varDecl`, `funDecl`, `classDecl`, and the shared
//! `function` production (spec.md §4.2).

use loxc_lex::Token;
use loxc_util::diagnostic::DiagnosticCode;
use loxc_util::symbol::{ID_INIT, ID_UNDERSCORE};
use loxc_util::{DiagnosticBuilder, Symbol};

use crate::ast::{Function, MethodDecl, MethodModifiers, Stmt};

use super::core::{ClassType, FunType, PResult, Parser};

/// Parameters beyond this many are reported but still accepted, matching
/// spec.md §4.2's "256th parameter is a diagnostic, non-fatal".
const MAX_PARAMS: usize = 255;

impl<'a> Parser<'a> {
    pub(crate) fn var_decl(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'var'
        let (name, _) = self.consume_ident("variable name")?;
        let init = if self.match_token(Token::Eq) {
            Some(self.expr()?)
        } else {
            None
        };
        let end = self.consume(Token::Semicolon, "after variable declaration")?;
        Ok(Stmt::VarDecl {
            name,
            init,
            span: start.merge(end),
        })
    }

    pub(crate) fn fun_decl(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'fun'
        let (name, _) = self.consume_ident("function name")?;
        let function = self.function(FunType::Function)?;
        let span = start.merge(function.span);
        Ok(Stmt::FunDecl {
            name,
            function,
            span,
        })
    }

    /// Shared by `funDecl`, `methodDecl`, and the `fun` expression
    /// production: `'(' paramList? ')' block`.
    pub(crate) fn function(&mut self, fun_type: FunType) -> PResult<Function> {
        let start = self.current_span;
        self.consume(Token::LParen, "after function name")?;

        let mut params: Vec<Symbol> = Vec::new();
        if !self.current_is(&Token::RParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    self.diagnose(
                        DiagnosticCode::E_PARSE_ARITY_LIMIT,
                        self.current_span,
                        "a function cannot take more than 255 parameters",
                    );
                }
                let (name, name_span) = self.consume_ident("parameter name")?;
                if name != ID_UNDERSCORE && params.contains(&name) {
                    // Reuses the resolver's "already declared" code: this is
                    // a scope-shape duplicate-declaration check performed
                    // early, at parse time, rather than a distinct parser
                    // diagnostic.
                    DiagnosticBuilder::error(format!(
                        "duplicate parameter name '{}'",
                        name.as_str()
                    ))
                    .span(name_span)
                    .code(DiagnosticCode::E_RESOLVE_DUPLICATE_DECL)
                    .emit(self.lexer.handler);
                }
                params.push(name);
                if !self.match_token(Token::Comma) {
                    break;
                }
            }
        }
        self.consume(Token::RParen, "after parameters")?;
        self.consume(Token::LBrace, "before function body")?;

        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        let saved_fun_type = std::mem::replace(&mut self.cur_fun_type, fun_type);
        let body = self.block_stmts();
        self.loop_depth = saved_loop_depth;
        self.cur_fun_type = saved_fun_type;
        let body = body?;

        let span = start.merge(self.previous_span);
        Ok(Function { params, body, span })
    }

    pub(crate) fn class_decl(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'class'
        let (name, _) = self.consume_ident("class name")?;

        let mut superclass = None;
        if self.match_token(Token::Lt) {
            let (super_name, super_span) = self.consume_ident("superclass name")?;
            if super_name == name {
                self.diagnose(
                    DiagnosticCode::E_RESOLVE_SELF_INHERITANCE,
                    super_span,
                    format!("class '{}' cannot inherit from itself", name.as_str()),
                );
            }
            superclass = Some(super_name);
        }

        self.consume(Token::LBrace, "before class body")?;
        let saved_class_type = std::mem::replace(
            &mut self.cur_class_type,
            if superclass.is_some() {
                ClassType::Subclass
            } else {
                ClassType::Class
            },
        );

        let mut methods = Vec::new();
        let mut result = Ok(());
        while !self.current_is(&Token::RBrace) && !self.is_at_end() {
            match self.method_decl() {
                Ok(method) => methods.push(method),
                Err(err) => {
                    result = Err(err);
                    break;
                },
            }
        }
        self.cur_class_type = saved_class_type;
        result?;

        let end = self.consume(Token::RBrace, "after class body")?;
        Ok(Stmt::ClassDecl {
            name,
            superclass,
            methods,
            span: start.merge(end),
        })
    }

    fn method_decl(&mut self) -> PResult<MethodDecl> {
        let start = self.current_span;
        let mut modifiers = MethodModifiers::default();
        loop {
            if self.match_token(Token::Static) {
                modifiers.is_static = true;
            } else if self.match_token(Token::Get) {
                modifiers.is_getter = true;
            } else if self.match_token(Token::Set) {
                modifiers.is_setter = true;
            } else {
                break;
            }
        }

        let (name, _) = self.consume_ident("method name")?;
        let fun_type = if name == ID_INIT {
            FunType::Init
        } else {
            FunType::Method
        };
        let function = self.function(fun_type)?;
        let span = start.merge(function.span);
        Ok(MethodDecl {
            modifiers,
            name,
            function,
            span,
        })
    }
}
