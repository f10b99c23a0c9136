//! Tree-walking interpreter (spec.md §4.4).

use std::io::{self, Write};
use std::rc::Rc;

use loxc_par::ast::{BinaryOp, Expr, Literal, Program, Stmt};
use loxc_util::symbol::ID_INIT;
use loxc_util::{FxHashMap, Span, Symbol};

use loxc_sem::{Resolution, Resolutions};

use crate::builtins::register_builtins;
use crate::callable::LoxFunction;
use crate::class::{LoxClass, LoxInstance, MethodTable};
use crate::environment::{ancestor, EnvRef, Environment};
use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

/// The three-valued statement outcome spec.md §4.4 calls a "control
/// signal": loops trap `Break`/`Continue`, function calls trap `Return`.
#[derive(Debug)]
pub enum Signal {
    Normal,
    Break,
    Continue,
    Return(Value),
}

#[derive(Default)]
pub(crate) struct Globals {
    values: FxHashMap<Symbol, Option<Value>>,
}

impl Globals {
    pub(crate) fn define(&mut self, name: Symbol, value: Option<Value>) {
        self.values.insert(name, value);
    }

    fn get(&self, name: Symbol, span: Span) -> RuntimeResult<Value> {
        match self.values.get(&name) {
            None => Err(RuntimeError::UndefinedVariable { name: name.as_str().to_string(), span }),
            Some(None) => Err(RuntimeError::Uninitialized { name: name.as_str().to_string(), span }),
            Some(Some(v)) => Ok(v.clone()),
        }
    }

    fn assign(&mut self, name: Symbol, value: Value, span: Span) -> RuntimeResult<()> {
        match self.values.get_mut(&name) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            },
            None => Err(RuntimeError::UndefinedVariable { name: name.as_str().to_string(), span }),
        }
    }
}

/// Interpreter state. Persists across repeated `exec_program` calls so a
/// REPL can build up globals one line at a time (spec.md §4.4's "state
/// persists across calls").
pub struct Interpreter {
    globals: Globals,
    /// Empty, parentless frame used as the closure base for any function
    /// or class declared at global scope.
    root: EnvRef,
    /// Current local frame, or `None` while executing at global scope
    /// (globals are never part of the `Environment` chain - see
    /// `loxc-sem::scope`'s `ScopeStack`, which never pushes one either).
    env: Option<EnvRef>,
    out: Box<dyn Write>,
    /// REPL mode: every expression statement also prints its result
    /// (spec.md §6).
    pub repl: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()), true)
    }

    pub fn with_writer(out: Box<dyn Write>, extra_features: bool) -> Self {
        let mut globals = Globals::default();
        register_builtins(&mut globals, extra_features);
        Self { globals, root: Environment::new_ref(None), env: None, out, repl: false }
    }

    fn current_closure_base(&self) -> EnvRef {
        self.env.clone().unwrap_or_else(|| self.root.clone())
    }

    fn resolution_for(&self, span: Span, res: &Resolutions) -> Resolution {
        res.get(&span.start).copied().unwrap_or(Resolution::Global)
    }

    fn lookup(&self, name: Symbol, span: Span, res: &Resolutions) -> RuntimeResult<Value> {
        match self.resolution_for(span, res) {
            Resolution::Local { depth, slot } => {
                let env =
                    ancestor(self.env.as_ref().expect("local resolution without an active environment"), depth);
                let value = env.borrow().get(slot as usize);
                value.ok_or_else(|| RuntimeError::Uninitialized { name: name.as_str().to_string(), span })
            },
            Resolution::Global => self.globals.get(name, span),
        }
    }

    fn assign_name(&mut self, name: Symbol, value: Value, span: Span, res: &Resolutions) -> RuntimeResult<()> {
        match self.resolution_for(span, res) {
            Resolution::Local { depth, slot } => {
                let env =
                    ancestor(self.env.as_ref().expect("local resolution without an active environment"), depth);
                env.borrow_mut().set(slot as usize, value);
                Ok(())
            },
            Resolution::Global => self.globals.assign(name, value, span),
        }
    }

    /// Defines `name` in whatever scope is currently active - a local
    /// slot if inside a function/block, or the global table otherwise.
    fn define_here(&mut self, name: Symbol, value: Option<Value>) {
        match &self.env {
            Some(env) => {
                env.borrow_mut().push_slot(value);
            },
            None => self.globals.define(name, value),
        }
    }

    pub fn exec_program(&mut self, program: &Program, res: &Resolutions) -> RuntimeResult<()> {
        for stmt in program {
            self.exec_stmt(stmt, res)?;
        }
        Ok(())
    }

    fn run_stmts(&mut self, stmts: &[Stmt], res: &Resolutions) -> RuntimeResult<Signal> {
        let mut signal = Signal::Normal;
        for stmt in stmts {
            signal = self.exec_stmt(stmt, res)?;
            if !matches!(signal, Signal::Normal) {
                break;
            }
        }
        Ok(signal)
    }

    fn run_for_loop(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        update: Option<&Expr>,
        body: &Stmt,
        res: &Resolutions,
    ) -> RuntimeResult<Signal> {
        if let Some(init) = init {
            self.exec_stmt(init, res)?;
        }
        loop {
            if let Some(cond) = cond {
                if !self.eval_expr(cond, res)?.truthy() {
                    break;
                }
            }
            match self.exec_stmt(body, res)? {
                Signal::Break => break,
                s @ Signal::Return(_) => return Ok(s),
                Signal::Continue | Signal::Normal => {},
            }
            if let Some(update) = update {
                self.eval_expr(update, res)?;
            }
        }
        Ok(Signal::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt, res: &Resolutions) -> RuntimeResult<Signal> {
        match stmt {
            Stmt::VarDecl { name, init, .. } => {
                let value = match init {
                    Some(e) => Some(self.eval_expr(e, res)?),
                    None => None,
                };
                self.define_here(*name, value);
                Ok(Signal::Normal)
            },
            Stmt::FunDecl { name, function, .. } => {
                let f = Rc::new(LoxFunction {
                    name: Some(*name),
                    declaration: Rc::new(function.clone()),
                    closure: self.current_closure_base(),
                    is_init: false,
                });
                self.define_here(*name, Some(Value::Function(f)));
                Ok(Signal::Normal)
            },
            Stmt::ClassDecl { name, superclass, methods, span } => {
                self.exec_class_decl(*name, *superclass, methods, *span)
            },
            Stmt::ExprStmt { expr, .. } => {
                let value = self.eval_expr(expr, res)?;
                if self.repl {
                    writeln!(self.out, "{}", value.display()).expect("stdout write failed");
                }
                Ok(Signal::Normal)
            },
            Stmt::PrintStmt { expr, .. } => {
                let value = self.eval_expr(expr, res)?;
                writeln!(self.out, "{}", value.display()).expect("stdout write failed");
                Ok(Signal::Normal)
            },
            Stmt::Block { stmts, .. } => {
                let saved_env = self.env.clone();
                self.env = Some(Environment::new_ref(Some(self.current_closure_base())));
                let result = self.run_stmts(stmts, res);
                self.env = saved_env;
                result
            },
            Stmt::IfStmt { cond, then_branch, else_branch, .. } => {
                if self.eval_expr(cond, res)?.truthy() {
                    self.exec_stmt(then_branch, res)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, res)
                } else {
                    Ok(Signal::Normal)
                }
            },
            Stmt::WhileStmt { cond, body, .. } => {
                loop {
                    if !self.eval_expr(cond, res)?.truthy() {
                        break;
                    }
                    match self.exec_stmt(body, res)? {
                        Signal::Break => break,
                        s @ Signal::Return(_) => return Ok(s),
                        Signal::Continue | Signal::Normal => {},
                    }
                }
                Ok(Signal::Normal)
            },
            Stmt::ForStmt { init, cond, update, body, .. } => {
                let saved_env = self.env.clone();
                self.env = Some(Environment::new_ref(Some(self.current_closure_base())));
                let result = self.run_for_loop(init.as_deref(), cond.as_ref(), update.as_ref(), body, res);
                self.env = saved_env;
                result
            },
            Stmt::BreakStmt { .. } => Ok(Signal::Break),
            Stmt::ContinueStmt { .. } => Ok(Signal::Continue),
            Stmt::ReturnStmt { value, .. } => {
                let v = match value {
                    Some(e) => self.eval_expr(e, res)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return(v))
            },
            Stmt::Comment { .. } | Stmt::IllegalStmt { .. } => Ok(Signal::Normal),
            Stmt::CommentedStmt { stmt, .. } => self.exec_stmt(stmt, res),
        }
    }

    fn exec_class_decl(
        &mut self,
        name: Symbol,
        superclass: Option<Symbol>,
        methods: &[loxc_par::ast::MethodDecl],
        span: Span,
    ) -> RuntimeResult<Signal> {
        // `ClassDecl.superclass` carries no span of its own (loxc-par's AST
        // has nowhere to key a resolver annotation by), so unlike every
        // other reference this crate resolves by distance/slot, the
        // superclass name is looked up directly in the global table. Real
        // Lox programs - and every §8 scenario - declare classes at the
        // top level, so this covers the cases this implementation targets;
        // a local class extending another local class is not supported.
        let superclass_value = match superclass {
            Some(sc_name) => match self.globals.get(sc_name, span)? {
                Value::Class(c) => Some(c),
                _ => return Err(RuntimeError::SuperclassNotClass { span }),
            },
            None => None,
        };

        let mut closure_base = self.current_closure_base();
        if let Some(ref sc) = superclass_value {
            let mut env = Environment::new(Some(closure_base));
            env.push_slot(Some(Value::Class(sc.clone())));
            closure_base = Rc::new(std::cell::RefCell::new(env));
        }

        let mut table = MethodTable::default();
        for m in methods {
            let f = Rc::new(LoxFunction {
                name: Some(m.name),
                declaration: Rc::new(m.function.clone()),
                closure: closure_base.clone(),
                is_init: m.name == ID_INIT,
            });
            if m.modifiers.is_static {
                table.statics.insert(m.name, f);
            } else if m.modifiers.is_getter {
                table.getters.insert(m.name, f);
            } else if m.modifiers.is_setter {
                table.setters.insert(m.name, f);
            } else {
                table.methods.insert(m.name, f);
            }
        }

        let class = Rc::new(LoxClass { name, superclass: superclass_value, table });
        self.define_here(name, Some(Value::Class(class)));
        Ok(Signal::Normal)
    }

    fn eval_expr(&mut self, expr: &Expr, res: &Resolutions) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                Literal::Number(n) => Value::Number(*n),
                Literal::String(s) => Value::Str(Rc::from(s.as_str())),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Nil => Value::Nil,
            }),
            Expr::Ident { name, span } => self.lookup(*name, *span, res),
            Expr::This { span } => match self.resolution_for(*span, res) {
                Resolution::Local { depth, slot } => {
                    let env = ancestor(self.env.as_ref().expect("'this' outside any scope"), depth);
                    let value = env.borrow().get(slot as usize);
                    value.ok_or_else(|| RuntimeError::Uninitialized { name: "this".to_string(), span: *span })
                },
                Resolution::Global => Err(RuntimeError::UndefinedVariable { name: "this".to_string(), span: *span }),
            },
            Expr::Super { method, span } => self.eval_super(*method, *span, res),
            Expr::Group { inner, .. } => self.eval_expr(inner, res),
            Expr::Unary { op, right, span } => {
                let v = self.eval_expr(right, res)?;
                v.unary(*op, *span)
            },
            Expr::Binary { left, op, right, span } => match op {
                BinaryOp::And => {
                    let l = self.eval_expr(left, res)?;
                    if !l.truthy() {
                        Ok(l)
                    } else {
                        self.eval_expr(right, res)
                    }
                },
                BinaryOp::Or => {
                    let l = self.eval_expr(left, res)?;
                    if l.truthy() {
                        Ok(l)
                    } else {
                        self.eval_expr(right, res)
                    }
                },
                _ => {
                    let l = self.eval_expr(left, res)?;
                    let r = self.eval_expr(right, res)?;
                    l.binary(*op, &r, *span)
                },
            },
            Expr::Ternary { cond, then_branch, else_branch, .. } => {
                if self.eval_expr(cond, res)?.truthy() {
                    self.eval_expr(then_branch, res)
                } else {
                    self.eval_expr(else_branch, res)
                }
            },
            Expr::Call { callee, args, paren, span } => {
                let callee_value = self.eval_expr(callee, res)?;
                let arg_spans: Vec<Span> = args.iter().map(Expr::span).collect();
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, res)?);
                }
                self.call_value(callee_value, arg_values, &arg_spans, *paren, *span, res)
            },
            Expr::Get { object, name, span } => {
                let obj = self.eval_expr(object, res)?;
                self.get_property(obj, *name, *span, res)
            },
            Expr::Set { object, name, value, span } => {
                let obj = self.eval_expr(object, res)?;
                let val = self.eval_expr(value, res)?;
                self.set_property(obj, *name, val, *span, res)
            },
            Expr::Assignment { name, value, span } => {
                let v = self.eval_expr(value, res)?;
                self.assign_name(*name, v.clone(), *span, res)?;
                Ok(v)
            },
            Expr::Fun { function, .. } => {
                let f = Rc::new(LoxFunction {
                    name: None,
                    declaration: Rc::new(function.clone()),
                    closure: self.current_closure_base(),
                    is_init: false,
                });
                Ok(Value::Function(f))
            },
            Expr::Comma { first, second, .. } => {
                self.eval_expr(first, res)?;
                self.eval_expr(second, res)
            },
        }
    }

    fn eval_super(&mut self, method: Symbol, span: Span, res: &Resolutions) -> RuntimeResult<Value> {
        let (depth, _slot) = match self.resolution_for(span, res) {
            Resolution::Local { depth, slot } => (depth, slot),
            Resolution::Global => {
                return Err(RuntimeError::UndefinedVariable { name: "super".to_string(), span });
            },
        };
        let env = self.env.as_ref().expect("'super' outside any scope");
        let super_env = ancestor(env, depth);
        let superclass = match super_env.borrow().get(0) {
            Some(Value::Class(c)) => c,
            _ => return Err(RuntimeError::SuperclassNotClass { span }),
        };
        // `this` always lives exactly one scope closer than `super` - the
        // resolver pushes the `this` synthetic scope immediately after
        // `super`'s (spec.md §4.3).
        let this_env = ancestor(env, depth - 1);
        let this_value =
            this_env.borrow().get(0).expect("'this' scope exists wherever 'super' does, by construction");

        let method_fn = superclass.find_method(method).ok_or_else(|| RuntimeError::UndefinedProperty {
            class_name: superclass.name.as_str().to_string(),
            property: method.as_str().to_string(),
            span,
        })?;
        Ok(Value::Function(method_fn.bind(this_value)))
    }

    fn get_property(&mut self, obj: Value, name: Symbol, span: Span, res: &Resolutions) -> RuntimeResult<Value> {
        match &obj {
            Value::Instance(inst_ref) => {
                if let Some(v) = inst_ref.borrow().fields.get(&name).cloned() {
                    return Ok(v);
                }
                let class = inst_ref.borrow().class.clone();
                if let Some(getter) = class.find_getter(name) {
                    let bound = getter.bind(obj.clone());
                    return self.call_function(&bound, Vec::new(), span, res);
                }
                if let Some(method) = class.find_method(name) {
                    let bound = method.bind(obj.clone());
                    return Ok(Value::Function(bound));
                }
                Err(RuntimeError::UndefinedProperty {
                    class_name: class.name.as_str().to_string(),
                    property: name.as_str().to_string(),
                    span,
                })
            },
            Value::Class(class) => class.find_static(name).map(Value::Function).ok_or_else(|| {
                RuntimeError::UndefinedProperty {
                    class_name: class.name.as_str().to_string(),
                    property: name.as_str().to_string(),
                    span,
                }
            }),
            other => Err(RuntimeError::TypeMismatch {
                message: format!("'{}' object has no properties", other.type_name()),
                span,
            }),
        }
    }

    fn set_property(
        &mut self,
        obj: Value,
        name: Symbol,
        value: Value,
        span: Span,
        res: &Resolutions,
    ) -> RuntimeResult<Value> {
        match &obj {
            Value::Instance(inst_ref) => {
                let class = inst_ref.borrow().class.clone();
                if let Some(setter) = class.find_setter(name) {
                    let bound = setter.bind(obj.clone());
                    self.call_function(&bound, vec![value.clone()], span, res)?;
                } else {
                    inst_ref.borrow_mut().fields.insert(name, value.clone());
                }
                Ok(value)
            },
            other => Err(RuntimeError::TypeMismatch {
                message: format!("cannot set a property on a {}", other.type_name()),
                span,
            }),
        }
    }

    fn call_value(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        arg_spans: &[Span],
        paren: Span,
        span: Span,
        res: &Resolutions,
    ) -> RuntimeResult<Value> {
        match callee {
            Value::Function(f) => self.call_function(&f, args, arg_spans, paren, res),
            Value::Native(n) => {
                if args.len() != n.arity {
                    let span = arity_span(n.arity, arg_spans, paren);
                    return Err(RuntimeError::ArityMismatch { expected: n.arity, got: args.len(), span });
                }
                (n.func)(&args)
            },
            Value::Class(c) => self.instantiate(c, args, arg_spans, paren, res),
            other => Err(RuntimeError::NotCallable { type_name: other.type_name().to_string(), span }),
        }
    }

    fn call_function(
        &mut self,
        f: &Rc<LoxFunction>,
        args: Vec<Value>,
        arg_spans: &[Span],
        paren: Span,
        res: &Resolutions,
    ) -> RuntimeResult<Value> {
        if args.len() != f.arity() {
            let span = arity_span(f.arity(), arg_spans, paren);
            return Err(RuntimeError::ArityMismatch { expected: f.arity(), got: args.len(), span });
        }
        let mut call_env = Environment::new(Some(f.closure.clone()));
        for v in args {
            call_env.push_slot(Some(v));
        }
        let saved_env = std::mem::replace(&mut self.env, Some(Rc::new(std::cell::RefCell::new(call_env))));
        let result = self.run_stmts(&f.declaration.body, res);
        self.env = saved_env;
        let signal = result?;

        if f.is_init {
            Ok(f.bound_this().unwrap_or(Value::Nil))
        } else {
            Ok(match signal {
                Signal::Return(v) => v,
                _ => Value::Nil,
            })
        }
    }

    fn instantiate(
        &mut self,
        class: Rc<LoxClass>,
        args: Vec<Value>,
        arg_spans: &[Span],
        paren: Span,
        res: &Resolutions,
    ) -> RuntimeResult<Value> {
        let instance = Rc::new(std::cell::RefCell::new(LoxInstance::new(class.clone())));
        match class.find_method(ID_INIT) {
            Some(init) => {
                let bound = init.bind(Value::Instance(instance.clone()));
                self.call_function(&bound, args, arg_spans, paren, res)?;
            },
            None if !args.is_empty() => {
                let span = arity_span(0, arg_spans, paren);
                return Err(RuntimeError::ArityMismatch { expected: 0, got: args.len(), span });
            },
            None => {},
        }
        Ok(Value::Instance(instance))
    }
}

/// The span an arity mismatch should blame (spec.md §4.4): the surplus
/// arguments when there are too many, or the call's own parens when
/// there are too few and no argument expression exists to point at.
fn arity_span(expected: usize, arg_spans: &[Span], paren: Span) -> Span {
    match arg_spans.get(expected..) {
        Some([first, .., last]) => first.merge(*last),
        Some([only]) => *only,
        _ => paren,
    }
}
