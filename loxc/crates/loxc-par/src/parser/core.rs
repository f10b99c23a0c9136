//! Core parser implementation.
//!
//! This module contains the main `Parser` struct, the token-pull plumbing
//! wrapping `Lexer`, and the unwind-and-synchronize error recovery step.

use loxc_lex::{Lexer, Token};
use loxc_util::diagnostic::DiagnosticCode;
use loxc_util::{DiagnosticBuilder, Handler, Span};

use crate::ast::{Program, Stmt};

use super::ParserOptions;

/// Context `curFunType` of spec.md §4.2: what kind of function body (if
/// any) the parser is currently inside. Governs `return` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunType {
    None,
    Function,
    Method,
    Init,
}

/// Context `curClassType` of spec.md §4.2: whether the parser is inside a
/// class body, and whether that class has a superclass. Governs `super`
/// checks performed downstream by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassType {
    None,
    Class,
    Subclass,
}

/// Sentinel used to unwind out of a failed declaration/statement/expression
/// without allocating an error value (spec.md §5, §9: "a synthetic unwind
/// signal caught at `parseDecl`"). The diagnostic itself has already been
/// emitted into the `Handler` by the time this is returned; callers other
/// than `declaration` just propagate it with `?`.
pub(crate) struct ParseUnwind;

pub(crate) type PResult<T> = Result<T, ParseUnwind>;

/// Recursive-descent parser for Lox source text.
///
/// Wraps a [`Lexer`] and keeps one token of lookahead (`current`) plus the
/// most recently consumed token (`previous`), mirroring the lexer's own
/// pull-style API. All fields are `pub` so the declaration/statement/
/// expression parsing methods, split across sibling modules, can share
/// them directly - the same shape `loxc_lex::Lexer` uses across its own
/// `identifier`/`number`/`string`/`comment` submodules.
pub struct Parser<'a> {
    pub lexer: Lexer<'a>,
    /// The token currently being examined (one token of lookahead).
    pub current: Token,
    pub current_span: Span,
    /// The most recently consumed token.
    pub previous: Token,
    pub previous_span: Span,
    pub preserve_comments: bool,
    /// Number of enclosing `while`/`for` loops; reset to 0 on entering a
    /// function body (spec.md §4.2).
    pub loop_depth: u32,
    pub cur_fun_type: FunType,
    pub cur_class_type: ClassType,
}

impl<'a> Parser<'a> {
    /// Creates a parser with default options (comments discarded, extra
    /// features enabled).
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self::with_options(source, handler, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    pub fn with_options(source: &'a str, handler: &'a mut Handler, options: ParserOptions) -> Self {
        let mut lexer = Lexer::with_extra_features(source, handler, options.extra_features);
        let (current, current_span) = Self::pull_significant(&mut lexer, options.preserve_comments);
        Self {
            lexer,
            current,
            current_span,
            previous: Token::Eof,
            previous_span: current_span,
            preserve_comments: options.preserve_comments,
            loop_depth: 0,
            cur_fun_type: FunType::None,
            cur_class_type: ClassType::None,
        }
    }

    /// Pulls the next token from `lexer`, skipping `Comment` tokens unless
    /// `preserve_comments` is set.
    fn pull_significant(lexer: &mut Lexer<'a>, preserve_comments: bool) -> (Token, Span) {
        loop {
            let token = lexer.next_token();
            let span = lexer.token_span();
            if !preserve_comments {
                if let Token::Comment(_) = token {
                    continue;
                }
            }
            return (token, span);
        }
    }

    /// Consumes `current`, advancing the lookahead by one significant
    /// token. Returns the token just consumed (i.e. the new `previous`).
    pub(crate) fn advance(&mut self) -> Token {
        let (token, span) = Self::pull_significant(&mut self.lexer, self.preserve_comments);
        self.previous = std::mem::replace(&mut self.current, token);
        self.previous_span = std::mem::replace(&mut self.current_span, span);
        self.previous.clone()
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current, Token::Eof)
    }

    pub(crate) fn current_is(&self, token: &Token) -> bool {
        &self.current == token
    }

    /// Consumes `current` if it equals `token`, reporting nothing either
    /// way.
    pub(crate) fn match_token(&mut self, token: Token) -> bool {
        if self.current_is(&token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `current` if it equals `token`; otherwise emits a "missing
    /// token" diagnostic and unwinds.
    pub(crate) fn consume(&mut self, token: Token, context: &str) -> PResult<Span> {
        if self.current_is(&token) {
            let span = self.current_span;
            self.advance();
            Ok(span)
        } else {
            let message = format!(
                "expected {} {context}, found {}",
                token.describe(),
                self.current.describe()
            );
            self.error_at_current(DiagnosticCode::E_PARSE_MISSING_TOKEN, message);
            Err(ParseUnwind)
        }
    }

    /// Consumes an identifier token, returning its interned name.
    pub(crate) fn consume_ident(&mut self, what: &str) -> PResult<(loxc_util::Symbol, Span)> {
        if let Token::Ident(name) = self.current.clone() {
            let span = self.current_span;
            self.advance();
            Ok((name, span))
        } else {
            let message = format!("expected {what}, found {}", self.current.describe());
            self.error_at_current(DiagnosticCode::E_PARSE_MISSING_TOKEN, message);
            Err(ParseUnwind)
        }
    }

    /// Emits a diagnostic at an explicit span. `Handler::emit` already
    /// suppresses a second diagnostic at the same start position, so
    /// callers never need to track "already reported here" themselves.
    pub(crate) fn diagnose(&mut self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .span(span)
            .code(code)
            .emit(self.lexer.handler);
    }

    fn error_at_current(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let span = self.current_span;
        self.diagnose(code, span, message);
    }

    /// Advances to a statement boundary: either the `;` just consumed or a
    /// token that starts a new statement (spec.md §4.2's `sync()`).
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous == Token::Semicolon {
                return;
            }
            if self.current.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    /// Parses the whole source as `program := decl* EOF`.
    pub fn parse_program(&mut self) -> Program {
        let mut stmts = Vec::new();
        while !self.is_at_end() {
            stmts.push(self.declaration());
        }
        stmts
    }

    /// Entry point for the unwind-and-catch recovery step. Called both by
    /// `parse_program` and, per statement, by block parsing - so a single
    /// bad statement inside a `{ }` doesn't abort the whole block, just
    /// becomes an `IllegalStmt` and parsing resumes after it.
    pub(crate) fn declaration(&mut self) -> Stmt {
        let start_span = self.current_span;
        match self.try_parse_declaration() {
            Ok(stmt) => self.attach_trailing_comment(stmt),
            Err(ParseUnwind) => {
                self.synchronize();
                Stmt::IllegalStmt {
                    span: start_span.merge(self.previous_span),
                }
            },
        }
    }

    fn try_parse_declaration(&mut self) -> PResult<Stmt> {
        match &self.current {
            Token::Var => self.var_decl(),
            Token::Fun => self.fun_decl(),
            Token::Class => self.class_decl(),
            _ => self.statement(),
        }
    }
}
