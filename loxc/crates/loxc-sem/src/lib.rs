//! loxc-sem - Lexical resolver for the Lox programming language.
//!
//! Walks a [`loxc_par::ast::Program`] once after parsing, computing a
//! scope distance + slot for every local variable reference (spec.md
//! §4.3) so the interpreter can look a local up by indexing a `Vec`
//! instead of hashing a name at every evaluation. Unresolved references
//! are left for the interpreter to treat as globals. Also where spec.md
//! §4.3's name-resolution diagnostics (duplicate declarations,
//! `this`/`super` misuse, unused locals, ...) are reported.
//!
//! # Example
//!
//! ```
//! use loxc_par::parse;
//! use loxc_sem::resolve;
//! use loxc_util::Handler;
//!
//! let mut handler = Handler::new();
//! let program = parse("var x = 1; print x;", &mut handler);
//! let resolutions = resolve(&program, &handler);
//! assert!(!handler.has_errors());
//! assert_eq!(resolutions.len(), 1); // the `print x` reference
//! ```

pub mod resolver;
pub mod scope;

#[cfg(test)]
mod edge_cases;

pub use resolver::{resolve, Resolution, Resolutions};
pub use scope::{Binding, BindingState, Scope, ScopeKind, ScopeStack};
