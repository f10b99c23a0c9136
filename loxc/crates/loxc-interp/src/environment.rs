//! Environment chain (spec.md §3 "Environment chain", §4.4, §5, §9).
//!
//! Each frame is a `Vec<Option<Value>>` indexed by the slot the resolver
//! (`loxc-sem::scope::ScopeStack`) assigned a binding, rather than a
//! `HashMap<Symbol, Value>` - the interpreter only ever reaches a local by
//! a known `(distance, slot)` pair, never by name. `None` in a slot means
//! "declared, not yet defined" (spec.md §4.4's uninitialized-slot error).
//!
//! Frames are `Rc<RefCell<Environment>>` with an `Option<...>` parent link:
//! shared ownership, no cycles (a closure holds its defining frame; the
//! frame never holds the closure back), matching spec.md §5/§9 exactly.

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

#[derive(Debug)]
pub struct Environment {
    slots: Vec<Option<Value>>,
    parent: Option<Rc<RefCell<Environment>>>,
}

pub type EnvRef = Rc<RefCell<Environment>>;

impl Environment {
    pub fn new(parent: Option<EnvRef>) -> Self {
        Self { slots: Vec::new(), parent }
    }

    pub fn new_ref(parent: Option<EnvRef>) -> EnvRef {
        Rc::new(RefCell::new(Self::new(parent)))
    }

    /// Declares the next slot in this frame, in the same left-to-right
    /// order the resolver declared the corresponding binding - the two
    /// walks of the same AST stay in lockstep, so slot indices agree.
    pub fn push_slot(&mut self, value: Option<Value>) -> usize {
        self.slots.push(value);
        self.slots.len() - 1
    }

    pub fn get(&self, slot: usize) -> Option<Value> {
        self.slots.get(slot).cloned().flatten()
    }

    pub fn set(&mut self, slot: usize, value: Value) {
        self.slots[slot] = Some(value);
    }

    pub fn parent(&self) -> Option<EnvRef> {
        self.parent.clone()
    }
}

/// Walks `distance` parent links up from `env`.
pub fn ancestor(env: &EnvRef, distance: u32) -> EnvRef {
    let mut current = env.clone();
    for _ in 0..distance {
        let next = current.borrow().parent().expect("resolver distance exceeds live environment chain");
        current = next;
    }
    current
}
