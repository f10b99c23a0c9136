//! loxc-interp - Tree-walking interpreter for the Lox programming language.
//!
//! Evaluates a [`loxc_par::ast::Program`] directly, using the
//! [`loxc_sem::Resolutions`] table computed by the resolver to reach every
//! local variable by a `(distance, slot)` pair rather than a name lookup
//! (spec.md §4.4). An [`Interpreter`] persists its global state across
//! repeated calls to [`Interpreter::exec_program`], so a REPL can build up
//! globals one line at a time (spec.md §4.4, §6).
//!
//! # Example
//!
//! ```
//! use loxc_par::parse;
//! use loxc_sem::resolve;
//! use loxc_interp::Interpreter;
//! use loxc_interp::sink::SharedBuffer;
//! use loxc_util::Handler;
//!
//! let mut handler = Handler::new();
//! let program = parse("print 1 + 2 * 3;", &mut handler);
//! let resolutions = resolve(&program, &handler);
//! assert!(!handler.has_errors());
//!
//! let out = SharedBuffer::new();
//! let mut interp = Interpreter::with_writer(Box::new(out.clone()), true);
//! interp.exec_program(&program, &resolutions).unwrap();
//! assert_eq!(out.as_string(), "7\n");
//! ```

mod builtins;
mod callable;
mod class;
mod environment;
pub mod error;
mod interpreter;
pub mod sink;
mod value;

#[cfg(test)]
mod edge_cases;

pub use callable::{LoxFunction, NativeFunction};
pub use class::{LoxClass, LoxInstance, MethodTable};
pub use environment::{EnvRef, Environment};
pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::{Interpreter, Signal};
pub use value::Value;
