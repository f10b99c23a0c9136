//! Native globals, registered from parsed stub declarations (spec.md
//! §4.4, §6, §9's "built-ins as Lox stubs").
//!
//! The stub sources exist so a formatter/linter/language server could
//! eventually treat built-ins like any other declaration (spec.md §9);
//! this crate has no such tooling, so it only uses the parse to recover
//! each stub's name and arity and cross-check it against the native
//! implementation below, rather than throwing the parsed tree away
//! entirely.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use loxc_par::ast::Stmt;
use loxc_par::ParserOptions;
use loxc_util::{Handler, Span, Symbol};

use crate::callable::NativeFunction;
use crate::error::RuntimeError;
use crate::interpreter::Globals;
use crate::value::Value;

const BASE_STUBS: &str = include_str!("../stubs/base.lox");
const EXTRA_STUBS: &str = include_str!("../stubs/extra.lox");

pub(crate) fn register_builtins(globals: &mut Globals, extra_features: bool) {
    register_stub_source(globals, BASE_STUBS);
    if extra_features {
        register_stub_source(globals, EXTRA_STUBS);
    }
}

fn register_stub_source(globals: &mut Globals, source: &str) {
    let mut handler = Handler::new();
    let options = ParserOptions { preserve_comments: true, extra_features: true };
    let program = loxc_par::parse_with_options(source, &mut handler, options);
    assert!(!handler.has_errors(), "embedded built-in stub source failed to parse");

    for stmt in &program {
        if let Some((name, arity)) = stub_signature(stmt) {
            let native = native_impl(name.as_str(), arity);
            globals.define(name, Some(Value::Native(Rc::new(native))));
        }
    }
}

/// Unwraps the `FunDecl` a stub declaration parses to, whether or not it
/// carries a trailing/leading comment node alongside it.
fn stub_signature(stmt: &Stmt) -> Option<(Symbol, usize)> {
    match stmt {
        Stmt::FunDecl { name, function, .. } => Some((*name, function.params.len())),
        Stmt::CommentedStmt { stmt, .. } => stub_signature(stmt),
        Stmt::Comment { .. } => None,
        other => panic!("built-in stub source contains a non-function declaration: {other:?}"),
    }
}

fn native_impl(name: &str, arity: usize) -> NativeFunction {
    let func: Box<dyn Fn(&[Value]) -> Result<Value, RuntimeError>> = match name {
        "clock" => Box::new(|_args| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock is before the Unix epoch")
                .as_secs_f64();
            Ok(Value::Number(secs))
        }),
        "str" => Box::new(|args| Ok(Value::Str(Rc::from(args[0].display().as_str())))),
        "type" => Box::new(|args| Ok(Value::Str(Rc::from(args[0].type_name())))),
        "panic" => Box::new(|args| {
            Err(RuntimeError::TypeMismatch { message: args[0].display(), span: Span::DUMMY })
        }),
        other => panic!("built-in stub '{other}' has no native implementation registered"),
    };
    NativeFunction { name: leak_name(name), arity, func }
}

/// `NativeFunction::name` is `&'static str`. Built-ins are a small, fixed
/// set known at compile time, so this just maps the parsed name back to
/// its `'static` literal rather than allocating.
fn leak_name(name: &str) -> &'static str {
    match name {
        "clock" => "clock",
        "str" => "str",
        "type" => "type",
        "panic" => "panic",
        other => panic!("built-in stub '{other}' has no native implementation registered"),
    }
}
