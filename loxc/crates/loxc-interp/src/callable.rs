//! User-defined and native functions (spec.md §3 "Runtime objects", §4.4).

use std::fmt;
use std::rc::Rc;

use loxc_par::ast::Function;
use loxc_util::Symbol;

use crate::environment::EnvRef;
use crate::error::RuntimeResult;
use crate::value::Value;

/// A user-defined function or method. Methods are produced by binding: see
/// [`LoxFunction::bind`] for the "one-slot child frame" `this` trick
/// spec.md §9 describes.
pub struct LoxFunction {
    pub name: Option<Symbol>,
    pub declaration: Rc<Function>,
    pub closure: EnvRef,
    /// Whether this is a class's `init` method - its call result is always
    /// the bound instance, never the body's own `return` value (spec.md
    /// §4.4: "returns the instance" regardless of a bare `return;`).
    pub is_init: bool,
}

impl LoxFunction {
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// Builds the method bound to `instance`: a one-slot child environment
    /// of this function's closure holding `this` at slot 0, matching the
    /// resolver's synthetic single-binding `this` scope exactly (spec.md
    /// §4.3, §9).
    pub fn bind(self: &Rc<Self>, instance: Value) -> Rc<LoxFunction> {
        let mut env = crate::environment::Environment::new(Some(self.closure.clone()));
        env.push_slot(Some(instance));
        Rc::new(LoxFunction {
            name: self.name,
            declaration: self.declaration.clone(),
            closure: Rc::new(std::cell::RefCell::new(env)),
            is_init: self.is_init,
        })
    }

    /// Fetches `this` out of a bound method's closure (slot 0 of the frame
    /// `bind` just built). Only meaningful for methods produced by `bind`.
    pub fn bound_this(&self) -> Option<Value> {
        self.closure.borrow().get(0)
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name.map(|n| n.as_str()).unwrap_or("anonymous"))
    }
}

/// A built-in implemented in host code, registered from a parsed stub
/// declaration (spec.md §4.4, §6, §9's "built-ins as Lox stubs").
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: Box<dyn Fn(&[Value]) -> RuntimeResult<Value>>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
