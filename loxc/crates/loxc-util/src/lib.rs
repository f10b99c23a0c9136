//! Core utilities shared by every stage of the Lox toolchain: source
//! positions, diagnostics, symbol interning, and typed index vectors.
//!
//! Nothing in this crate depends on any other workspace crate.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span, SourceFile, SourceMap};
pub use symbol::{Symbol, StringTable};

pub use rustc_hash::{FxHashMap, FxHashSet};
