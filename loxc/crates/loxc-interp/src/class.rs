//! Classes and instances (spec.md §4.4 "Classes").

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use loxc_util::{FxHashMap, Symbol};

use crate::callable::LoxFunction;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct MethodTable {
    pub methods: FxHashMap<Symbol, Rc<LoxFunction>>,
    pub getters: FxHashMap<Symbol, Rc<LoxFunction>>,
    pub setters: FxHashMap<Symbol, Rc<LoxFunction>>,
    pub statics: FxHashMap<Symbol, Rc<LoxFunction>>,
}

pub struct LoxClass {
    pub name: Symbol,
    pub superclass: Option<Rc<LoxClass>>,
    pub table: MethodTable,
}

impl LoxClass {
    pub fn find_method(&self, name: Symbol) -> Option<Rc<LoxFunction>> {
        self.table
            .methods
            .get(&name)
            .cloned()
            .or_else(|| self.superclass.as_ref().and_then(|s| s.find_method(name)))
    }

    pub fn find_getter(&self, name: Symbol) -> Option<Rc<LoxFunction>> {
        self.table
            .getters
            .get(&name)
            .cloned()
            .or_else(|| self.superclass.as_ref().and_then(|s| s.find_getter(name)))
    }

    pub fn find_setter(&self, name: Symbol) -> Option<Rc<LoxFunction>> {
        self.table
            .setters
            .get(&name)
            .cloned()
            .or_else(|| self.superclass.as_ref().and_then(|s| s.find_setter(name)))
    }

    pub fn find_static(&self, name: Symbol) -> Option<Rc<LoxFunction>> {
        self.table
            .statics
            .get(&name)
            .cloned()
            .or_else(|| self.superclass.as_ref().and_then(|s| s.find_static(name)))
    }
}

impl fmt::Debug for LoxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name.as_str())
    }
}

#[derive(Debug)]
pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    pub fields: FxHashMap<Symbol, Value>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self { class, fields: FxHashMap::default() }
    }
}

pub type InstanceRef = Rc<RefCell<LoxInstance>>;
