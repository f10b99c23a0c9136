//! Scope stack for name resolution (spec.md §4.3).
//!
//! Generalizes the source crate's `Rib`/`RibKind`/`ScopeTree` shape: a stack
//! of scopes searched innermost-to-outermost. Unlike the source crate's
//! `HashMap<Symbol, DefId>` ribs, each scope here is an [`indexmap::IndexMap`]
//! so insertion order doubles as the local's **slot index** - the interpreter
//! allocates each environment frame as a `Vec<Value>` of that same size and
//! indexes into it directly instead of hashing on every variable read.

use indexmap::IndexMap;
use loxc_util::{Span, Symbol};

/// The three-state lifecycle of a local binding (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// `var x` or a parameter/method name has been seen, but its
    /// initializer (if any) has not finished evaluating yet.
    Declared,
    /// The initializer has completed (or the binding is a function/class,
    /// defined immediately so its body can reference itself recursively).
    Defined,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub state: BindingState,
    pub used: bool,
    /// Span of the declaration, for the unused-variable hint.
    pub span: Span,
}

/// What kind of scope this is, purely to decide whether an unused binding
/// is worth a hint - we don't warn about unused parameters or unused
/// synthetic `this`/`super` slots the way we warn about unused locals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Block,
    Function,
    Class,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub bindings: IndexMap<Symbol, Binding>,
}

/// A stack of scopes. The global scope is never pushed here: an identifier
/// resolved against no entry in the stack is a global reference, resolved
/// dynamically by the interpreter instead of by slot.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            kind,
            bindings: IndexMap::new(),
        });
    }

    pub fn pop(&mut self) -> Scope {
        self.scopes.pop().expect("pop() called on an empty scope stack")
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `name` in the innermost scope, returning the existing
    /// binding if `name` was already declared there (spec.md §4.3's
    /// redeclaration check is the caller's responsibility).
    pub fn declare(&mut self, name: Symbol, span: Span) -> Option<Binding> {
        let scope = self.scopes.last_mut().expect("declare() with no active scope");
        scope.bindings.insert(
            name,
            Binding {
                state: BindingState::Declared,
                used: false,
                span,
            },
        )
    }

    /// Marks `name` (just declared in the innermost scope) as defined.
    pub fn define(&mut self, name: Symbol) {
        let scope = self.scopes.last_mut().expect("define() with no active scope");
        if let Some(binding) = scope.bindings.get_mut(&name) {
            binding.state = BindingState::Defined;
        }
    }

    /// Looks up `name` from the innermost scope outward. Returns the scope
    /// distance (0 = innermost) and slot index, and marks the binding used.
    pub fn resolve(&mut self, name: Symbol) -> Option<(u32, u32, BindingState)> {
        for (distance, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(slot) = scope.bindings.get_index_of(&name) {
                let (_, binding) = scope
                    .bindings
                    .get_index_mut(slot)
                    .expect("slot just returned by get_index_of");
                binding.used = true;
                return Some((distance as u32, slot as u32, binding.state));
            }
        }
        None
    }

    /// Innermost scope only - used for the same-scope redeclaration and
    /// self-referential-initializer checks, which only ever look at the
    /// scope currently being populated.
    pub fn innermost(&self) -> Option<&Scope> {
        self.scopes.last()
    }
}
