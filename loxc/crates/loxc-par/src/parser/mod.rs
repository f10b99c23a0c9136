//! Parser module.
//!
//! Organized like `loxc-lex`'s lexer module: one file per concern.
//! - `core` - `Parser` struct, token-stream plumbing, error recovery
//! - `decl` - top-level declarations (`var`, `fun`, `class`)
//! - `stmt` - statements
//! - `expr` - the precedence-cascade expression grammar

mod core;
mod decl;
mod expr;
mod stmt;

pub use self::core::Parser;

use crate::ast::Program;
use loxc_util::Handler;

/// Options controlling parser behavior (spec.md §9's "extra features" flag,
/// and whether `//` comments are retained as AST nodes).
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Whether `//` comments surface as `Stmt::Comment`/`Stmt::CommentedStmt`
    /// nodes instead of being silently discarded.
    pub preserve_comments: bool,
    /// Enables `break`, `continue`, `static`, `get`, `set`, `%`, `?`, `:`,
    /// `[`, `]`, and string escapes in the underlying lexer.
    pub extra_features: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            preserve_comments: false,
            extra_features: true,
        }
    }
}

/// Parses `source` into a [`Program`] with default options. Diagnostics are
/// reported into `handler`; the returned tree is always structurally
/// complete, even when `handler.has_errors()` afterward (spec.md §4.2).
pub fn parse(source: &str, handler: &mut Handler) -> Program {
    Parser::new(source, handler).parse_program()
}

/// Parses `source` with explicit [`ParserOptions`].
pub fn parse_with_options(source: &str, handler: &mut Handler, options: ParserOptions) -> Program {
    Parser::with_options(source, handler, options).parse_program()
}
