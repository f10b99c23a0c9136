//! Runtime error type (spec.md §4.4, §7).
//!
//! Unlike lex/parse/resolve diagnostics, which accumulate in a [`Handler`]
//! and let the next stage proceed on a partial tree, a runtime error
//! unwinds straight to the outermost [`crate::interpret`] call (spec.md
//! §7: "Runtime errors unwind to the outermost `interpret()` call and are
//! returned to the caller"). `RuntimeError` is therefore a plain
//! `Result`-propagated value, not something pushed into a `Handler` as it
//! happens - callers that want it folded into the shared diagnostic
//! substrate call [`RuntimeError::emit`].

use loxc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("cannot divide by 0")]
    DivideByZero { span: Span },

    #[error("{message}")]
    TypeMismatch { message: String, span: Span },

    #[error("'{name}' is not defined")]
    UndefinedVariable { name: String, span: Span },

    /// spec.md §4.4: "A read of a declared-but-uninitialized slot raises
    /// 'x has not been initialised'" - reuses `E_RUNTIME_UNDEFINED_VARIABLE`
    /// rather than minting a tenth runtime code for what is, from the
    /// resolver's three-state model, the same family of failure (a name
    /// that doesn't yet resolve to a usable value).
    #[error("'{name}' has not been initialised")]
    Uninitialized { name: String, span: Span },

    #[error("'{type_name}' object is not callable")]
    NotCallable { type_name: String, span: Span },

    #[error("expected {expected} argument(s) but got {got}")]
    ArityMismatch { expected: usize, got: usize, span: Span },

    #[error("'{class_name}' object has no property '{property}'")]
    UndefinedProperty {
        class_name: String,
        property: String,
        span: Span,
    },

    #[error("superclass must be a class")]
    SuperclassNotClass { span: Span },
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::DivideByZero { span }
            | RuntimeError::TypeMismatch { span, .. }
            | RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::Uninitialized { span, .. }
            | RuntimeError::NotCallable { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::UndefinedProperty { span, .. }
            | RuntimeError::SuperclassNotClass { span } => *span,
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self {
            RuntimeError::DivideByZero { .. } => DiagnosticCode::E_RUNTIME_DIVIDE_BY_ZERO,
            RuntimeError::TypeMismatch { .. } => DiagnosticCode::E_RUNTIME_TYPE_MISMATCH,
            RuntimeError::UndefinedVariable { .. } | RuntimeError::Uninitialized { .. } => {
                DiagnosticCode::E_RUNTIME_UNDEFINED_VARIABLE
            },
            RuntimeError::NotCallable { .. } => DiagnosticCode::E_RUNTIME_NOT_CALLABLE,
            RuntimeError::ArityMismatch { .. } => DiagnosticCode::E_RUNTIME_ARITY_MISMATCH,
            RuntimeError::UndefinedProperty { .. } => DiagnosticCode::E_RUNTIME_UNDEFINED_PROPERTY,
            RuntimeError::SuperclassNotClass { .. } => DiagnosticCode::E_RUNTIME_SUPERCLASS_NOT_CLASS,
        }
    }

    /// Folds this error into `handler` alongside the lex/parse/resolve
    /// diagnostics, so a caller can render every stage's output uniformly.
    pub fn emit(&self, handler: &Handler) {
        DiagnosticBuilder::error(self.to_string())
            .span(self.span())
            .code(self.code())
            .emit(handler);
    }
}

pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
