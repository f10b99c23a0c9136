//! Lexical resolver (spec.md §4.3).
//!
//! Walks the parsed tree once, annotating every `Ident`, `This`, `Super`,
//! and `Assignment` occurrence with a scope distance + slot (or `Global`),
//! and reporting the name-resolution diagnostics spec.md §4.3 lists.
//! `break`/`continue`/`return` misuse is normally caught by the parser
//! (spec.md §4.2's context tracking); this module re-checks them with its
//! own independent `loop_depth`/`cur_fun_type` state "for robustness" (as
//! spec.md §4.3 puts it) - a violation the parser already reported is
//! simply deduplicated by `Handler::emit`'s same-start-position rule.

use std::collections::HashMap;

use loxc_par::ast::{Expr, Function, MethodDecl, Program, Stmt};
use loxc_util::symbol::{ID_INIT, ID_UNDERSCORE, KW_SUPER, KW_THIS};
use loxc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Symbol};

use crate::scope::{BindingState, ScopeKind, ScopeStack};

/// What a reference resolves to: a local slot at a known scope distance,
/// or a name the interpreter must look up in the global environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Local { depth: u32, slot: u32 },
    Global,
}

/// Resolutions keyed by the byte offset the reference starts at. Every
/// `Ident`/`This`/`Super`/`Assignment` node has a distinct starting
/// position, so the start offset doubles as a stable per-occurrence key
/// without needing node ids threaded through the AST.
pub type Resolutions = HashMap<usize, Resolution>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunType {
    None,
    Function,
    Method,
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

struct Resolver<'a> {
    scopes: ScopeStack,
    resolutions: Resolutions,
    loop_depth: u32,
    cur_fun_type: FunType,
    cur_class_type: ClassType,
    handler: &'a Handler,
}

/// Resolves `program`, reporting diagnostics into `handler` and returning
/// the per-reference resolution table the interpreter consults at runtime.
pub fn resolve(program: &Program, handler: &Handler) -> Resolutions {
    let mut resolver = Resolver {
        scopes: ScopeStack::new(),
        resolutions: HashMap::new(),
        loop_depth: 0,
        cur_fun_type: FunType::None,
        cur_class_type: ClassType::None,
        handler,
    };
    for stmt in program {
        resolver.resolve_stmt(stmt);
    }
    resolver.resolutions
}

impl<'a> Resolver<'a> {
    fn diagnose(&self, code: DiagnosticCode, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message).span(span).code(code).emit(self.handler);
    }

    fn hint_unused(&self, span: Span, name: Symbol) {
        DiagnosticBuilder::warning(format!("'{}' has been declared but is never used", name.as_str()))
            .span(span)
            .code(DiagnosticCode::W_RESOLVE_UNUSED_VARIABLE)
            .emit(self.handler);
    }

    /// Pops the current scope, emitting an unused-variable hint for every
    /// binding that was never read (skipping the wildcard `_` and the
    /// synthetic `this`/`super` slots of a class scope).
    fn end_scope(&mut self) {
        let scope = self.scopes.pop();
        if scope.kind == ScopeKind::Class {
            return;
        }
        for (name, binding) in scope.bindings.iter() {
            if !binding.used && *name != ID_UNDERSCORE {
                self.hint_unused(binding.span, *name);
            }
        }
    }

    /// Declares `name` in the current scope if one is active (a local),
    /// checking for same-scope redeclaration; does nothing at global scope,
    /// since spec.md §4.3 only forbids "redeclaration of a non-global x".
    fn declare_local(&mut self, name: Symbol, span: Span) {
        if self.scopes.is_empty() {
            return;
        }
        if let Some(scope) = self.scopes.innermost() {
            if scope.bindings.contains_key(&name) {
                self.diagnose(
                    DiagnosticCode::E_RESOLVE_DUPLICATE_DECL,
                    span,
                    format!("'{}' has already been declared", name.as_str()),
                );
            }
        }
        self.scopes.declare(name, span);
    }

    fn define_local(&mut self, name: Symbol) {
        if !self.scopes.is_empty() {
            self.scopes.define(name);
        }
    }

    /// Resolves a read of `name` at `span` (an `Ident` or an `Assignment`
    /// target): flags a same-scope declared-but-not-yet-defined reference,
    /// then records the resolution (local slot, or global).
    fn resolve_name_ref(&mut self, name: Symbol, span: Span) {
        if let Some(scope) = self.scopes.innermost() {
            if let Some(binding) = scope.bindings.get(&name) {
                if binding.state == BindingState::Declared {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_SELF_REFERENTIAL_INIT,
                        span,
                        format!("'{}' read in its own initializer", name.as_str()),
                    );
                }
            }
        }
        let resolution = match self.scopes.resolve(name) {
            Some((depth, slot, _)) => Resolution::Local { depth, slot },
            None => Resolution::Global,
        };
        self.resolutions.insert(span.start, resolution);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { name, init, span } => {
                self.declare_local(*name, *span);
                if let Some(init) = init {
                    self.resolve_expr(init);
                }
                self.define_local(*name);
            },
            Stmt::FunDecl { name, function, span } => {
                self.declare_local(*name, *span);
                self.define_local(*name);
                self.resolve_function(function, FunType::Function);
            },
            Stmt::ClassDecl { name, superclass, methods, span } => {
                self.declare_local(*name, *span);
                self.define_local(*name);
                self.resolve_class(*superclass, methods);
            },
            Stmt::ExprStmt { expr, .. } => self.resolve_expr(expr),
            Stmt::PrintStmt { expr, .. } => self.resolve_expr(expr),
            Stmt::Block { stmts, .. } => {
                self.scopes.push(ScopeKind::Block);
                for stmt in stmts {
                    self.resolve_stmt(stmt);
                }
                self.end_scope();
            },
            Stmt::IfStmt { cond, then_branch, else_branch, .. } => {
                self.resolve_expr(cond);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            },
            Stmt::WhileStmt { cond, body, .. } => {
                self.resolve_expr(cond);
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
            },
            Stmt::ForStmt { init, cond, update, body, .. } => {
                self.scopes.push(ScopeKind::Block);
                if let Some(init) = init {
                    self.resolve_stmt(init);
                }
                if let Some(cond) = cond {
                    self.resolve_expr(cond);
                }
                if let Some(update) = update {
                    self.resolve_expr(update);
                }
                self.loop_depth += 1;
                self.resolve_stmt(body);
                self.loop_depth -= 1;
                self.end_scope();
            },
            Stmt::BreakStmt { span } => {
                if self.loop_depth == 0 {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_JUMP_OUTSIDE_LOOP,
                        *span,
                        "'break' used outside a loop",
                    );
                }
            },
            Stmt::ContinueStmt { span } => {
                if self.loop_depth == 0 {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_JUMP_OUTSIDE_LOOP,
                        *span,
                        "'continue' used outside a loop",
                    );
                }
            },
            Stmt::ReturnStmt { value, span } => {
                if self.cur_fun_type == FunType::None {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_RETURN_OUTSIDE_FN,
                        *span,
                        "'return' used outside a function",
                    );
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                    if self.cur_fun_type == FunType::Init {
                        self.diagnose(
                            DiagnosticCode::E_RESOLVE_RETURN_VALUE_IN_INIT,
                            *span,
                            "cannot return a value from an initializer",
                        );
                    }
                }
            },
            Stmt::Comment { .. } | Stmt::IllegalStmt { .. } => {},
            Stmt::CommentedStmt { stmt, .. } => self.resolve_stmt(stmt),
        }
    }

    fn resolve_function(&mut self, function: &Function, fun_type: FunType) {
        let saved_loop_depth = std::mem::replace(&mut self.loop_depth, 0);
        let saved_fun_type = std::mem::replace(&mut self.cur_fun_type, fun_type);

        self.scopes.push(ScopeKind::Function);
        for param in &function.params {
            // Parameters carry no individual span (spec.md §3's `Function`
            // only spans the whole function); the function's own span is
            // the closest available location for an unused-parameter hint.
            self.declare_local(*param, function.span);
            self.define_local(*param);
        }
        for stmt in &function.body {
            self.resolve_stmt(stmt);
        }
        self.end_scope();

        self.loop_depth = saved_loop_depth;
        self.cur_fun_type = saved_fun_type;
    }

    fn resolve_class(&mut self, superclass: Option<Symbol>, methods: &[MethodDecl]) {
        let saved_class_type = self.cur_class_type;
        self.cur_class_type = if superclass.is_some() { ClassType::Subclass } else { ClassType::Class };

        // Superclass itself is resolved dynamically by the interpreter
        // (spec.md §4.4): it is stored as a bare `Symbol` with no span of
        // its own, so there is nothing to annotate here.
        if superclass.is_some() {
            self.scopes.push(ScopeKind::Class);
            self.scopes.declare(KW_SUPER, Span::DUMMY);
            self.scopes.define(KW_SUPER);
        }

        self.scopes.push(ScopeKind::Class);
        self.scopes.declare(KW_THIS, Span::DUMMY);
        self.scopes.define(KW_THIS);

        for method in methods {
            let fun_type = if method.name == ID_INIT { FunType::Init } else { FunType::Method };
            self.resolve_function(&method.function, fun_type);
        }

        self.end_scope(); // this
        if superclass.is_some() {
            self.end_scope(); // super
        }

        self.cur_class_type = saved_class_type;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {},
            Expr::Ident { name, span } => self.resolve_name_ref(*name, *span),
            Expr::This { span } => {
                if self.cur_class_type == ClassType::None {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_THIS_OUTSIDE_METHOD,
                        *span,
                        "'this' used outside a method",
                    );
                }
                self.resolve_name_ref(KW_THIS, *span);
            },
            Expr::Super { span, .. } => {
                if self.cur_class_type != ClassType::Subclass {
                    self.diagnose(
                        DiagnosticCode::E_RESOLVE_SUPER_OUTSIDE_SUBCLASS,
                        *span,
                        "'super' used outside a subclass method",
                    );
                }
                self.resolve_name_ref(KW_SUPER, *span);
            },
            Expr::Group { inner, .. } => self.resolve_expr(inner),
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            },
            Expr::Ternary { cond, then_branch, else_branch, .. } => {
                self.resolve_expr(cond);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            },
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            },
            Expr::Get { object, .. } => self.resolve_expr(object),
            Expr::Set { object, value, .. } => {
                self.resolve_expr(object);
                self.resolve_expr(value);
            },
            Expr::Assignment { name, value, span } => {
                self.resolve_expr(value);
                self.resolve_name_ref(*name, *span);
            },
            Expr::Fun { function, .. } => self.resolve_function(function, FunType::Function),
            Expr::Comma { first, second, .. } => {
                self.resolve_expr(first);
                self.resolve_expr(second);
            },
        }
    }
}
