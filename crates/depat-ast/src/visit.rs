//! Read-only tree walking.
//!
//! [`Visit`] has one hook per interesting node with a default that walks the
//! children, so a query only overrides the hooks it cares about. The queries
//! the lowering needs are implemented at the bottom of the file.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::ast::*;

pub trait Visit {
    /// Identifier in reference position (`x` or the `x` in `x.y`)
    fn visit_ident(&mut self, _ident: &Ident) {}

    /// Identifier introduced or assigned by a pattern
    fn visit_binding(&mut self, _ident: &Ident) {}

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function);
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(ident) => v.visit_ident(ident),
        Expr::Null
        | Expr::Bool { .. }
        | Expr::Num { .. }
        | Expr::Str { .. }
        | Expr::Undefined
        | Expr::This => {}
        Expr::Array { elements } => {
            for element in elements.iter().flatten() {
                v.visit_expr(&element.expr);
            }
        }
        Expr::Object { props } => {
            for prop in props {
                match prop {
                    ObjectMember::KeyValue { key, value } => {
                        walk_prop_key(v, key);
                        v.visit_expr(value);
                    }
                    ObjectMember::Spread { expr } => v.visit_expr(expr),
                }
            }
        }
        Expr::Member { object, property } => {
            v.visit_expr(object);
            walk_prop_key(v, property);
        }
        Expr::Call { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(&arg.expr);
            }
        }
        Expr::Assign { target, value, .. } => {
            v.visit_pattern(target);
            v.visit_expr(value);
        }
        Expr::Sequence { exprs } => {
            for expr in exprs {
                v.visit_expr(expr);
            }
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test);
            v.visit_expr(consequent);
            v.visit_expr(alternate);
        }
        Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Unary { argument, .. } => v.visit_expr(argument),
        Expr::Function(function) => v.visit_function(function),
        Expr::Arrow { params, body } => {
            for param in params {
                v.visit_pattern(param);
            }
            match body {
                ArrowBody::Expr { expr } => v.visit_expr(expr),
                ArrowBody::Block { body } => {
                    for stmt in body {
                        v.visit_stmt(stmt);
                    }
                }
            }
        }
    }
}

/// Only computed keys contain references.
pub fn walk_prop_key<V: Visit + ?Sized>(v: &mut V, key: &PropKey) {
    if let PropKey::Computed { expr } = key {
        v.visit_expr(expr);
    }
}

pub fn walk_pattern<V: Visit + ?Sized>(v: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Ident(ident) => v.visit_binding(ident),
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                v.visit_pattern(element);
            }
            if let Some(rest) = &array.rest {
                v.visit_pattern(&rest.target);
            }
        }
        Pattern::Object(object) => {
            for prop in &object.properties {
                walk_prop_key(v, &prop.key);
                v.visit_pattern(&prop.value);
            }
            if let Some(rest) = &object.rest {
                v.visit_pattern(&rest.target);
            }
        }
        Pattern::Assign(assign) => {
            v.visit_pattern(&assign.target);
            v.visit_expr(&assign.default_value);
        }
        Pattern::Expr { expr } => v.visit_expr(expr),
    }
}

pub fn walk_function<V: Visit + ?Sized>(v: &mut V, function: &Function) {
    if let Some(name) = &function.name {
        v.visit_binding(name);
    }
    for param in &function.params {
        v.visit_pattern(param);
    }
    for stmt in &function.body {
        v.visit_stmt(stmt);
    }
}

fn walk_var_decl<V: Visit + ?Sized>(v: &mut V, decl: &VarDecl) {
    for declarator in &decl.decls {
        v.visit_pattern(&declarator.id);
        if let Some(init) = &declarator.init {
            v.visit_expr(init);
        }
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr { expr } | Stmt::Throw { argument: expr } => v.visit_expr(expr),
        Stmt::Var(decl) => walk_var_decl(v, decl),
        Stmt::Block { body } => {
            for stmt in body {
                v.visit_stmt(stmt);
            }
        }
        Stmt::If {
            test,
            consequent,
            alternate,
        } => {
            v.visit_expr(test);
            v.visit_stmt(consequent);
            if let Some(alternate) = alternate {
                v.visit_stmt(alternate);
            }
        }
        Stmt::For {
            init,
            test,
            update,
            body,
        } => {
            match init {
                Some(ForInit::Var(decl)) => walk_var_decl(v, decl),
                Some(ForInit::Expr { expr }) => v.visit_expr(expr),
                None => {}
            }
            if let Some(test) = test {
                v.visit_expr(test);
            }
            if let Some(update) = update {
                v.visit_expr(update);
            }
            v.visit_stmt(body);
        }
        Stmt::ForIn(for_in_of) | Stmt::ForOf(for_in_of) => {
            match &for_in_of.left {
                ForHead::Var(decl) => walk_var_decl(v, decl),
                ForHead::Pattern { pattern } => v.visit_pattern(pattern),
            }
            v.visit_expr(&for_in_of.right);
            v.visit_stmt(&for_in_of.body);
        }
        Stmt::While { test, body } => {
            v.visit_expr(test);
            v.visit_stmt(body);
        }
        Stmt::Try(try_stmt) => {
            for stmt in &try_stmt.block {
                v.visit_stmt(stmt);
            }
            if let Some(handler) = &try_stmt.handler {
                if let Some(param) = &handler.param {
                    v.visit_pattern(param);
                }
                for stmt in &handler.body {
                    v.visit_stmt(stmt);
                }
            }
            for stmt in try_stmt.finalizer.iter().flatten() {
                v.visit_stmt(stmt);
            }
        }
        Stmt::Return { argument } => {
            if let Some(argument) = argument {
                v.visit_expr(argument);
            }
        }
        Stmt::Function(function) => v.visit_function(function),
        Stmt::ExportNamed(export) => {
            if let Some(decl) = &export.declaration {
                walk_var_decl(v, decl);
            }
            for specifier in &export.specifiers {
                v.visit_ident(&specifier.local);
            }
        }
        Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty => {}
    }
}

// =========================================================================
// Queries
// =========================================================================

struct BindingNames {
    names: IndexSet<String>,
}

impl Visit for BindingNames {
    fn visit_binding(&mut self, ident: &Ident) {
        self.names.insert(ident.name.clone());
    }

    // Defaults and computed keys do not bind names.
    fn visit_expr(&mut self, _expr: &Expr) {}
}

/// Names bound by a pattern, in source order, without duplicates.
pub fn binding_names(pattern: &Pattern) -> IndexSet<String> {
    let mut collector = BindingNames {
        names: IndexSet::new(),
    };
    collector.visit_pattern(pattern);
    collector.names
}

/// Names bound by every declarator of a declaration.
pub fn declaration_binding_names(decl: &VarDecl) -> IndexSet<String> {
    let mut collector = BindingNames {
        names: IndexSet::new(),
    };
    for declarator in &decl.decls {
        collector.visit_pattern(&declarator.id);
    }
    collector.names
}

struct AllIdentifiers {
    names: FxHashSet<String>,
}

impl Visit for AllIdentifiers {
    fn visit_ident(&mut self, ident: &Ident) {
        self.names.insert(ident.name.clone());
    }

    fn visit_binding(&mut self, ident: &Ident) {
        self.names.insert(ident.name.clone());
    }
}

struct AssignedNames {
    names: FxHashSet<String>,
}

impl Visit for AssignedNames {
    fn visit_binding(&mut self, ident: &Ident) {
        self.names.insert(ident.name.clone());
    }
}

/// Every name `pattern` may write: its targets plus anything assigned inside
/// its defaults and computed keys. Names bound by nested functions count too.
pub fn assigned_names(pattern: &Pattern) -> FxHashSet<String> {
    let mut collector = AssignedNames {
        names: FxHashSet::default(),
    };
    collector.visit_pattern(pattern);
    collector.names
}

/// Every identifier name bound or referenced anywhere in the program.
pub fn collect_identifiers(program: &Program) -> FxHashSet<String> {
    let mut collector = AllIdentifiers {
        names: FxHashSet::default(),
    };
    for stmt in &program.body {
        collector.visit_stmt(stmt);
    }
    collector.names
}

struct ReferencesAny<'a> {
    names: &'a IndexSet<String>,
    found: bool,
}

impl Visit for ReferencesAny<'_> {
    fn visit_ident(&mut self, ident: &Ident) {
        if self.names.contains(&ident.name) {
            self.found = true;
        }
    }

    fn visit_binding(&mut self, ident: &Ident) {
        self.visit_ident(ident);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if !self.found {
            walk_expr(self, expr);
        }
    }
}

/// Whether `expr` reads or assigns any of `names` (nested functions included).
pub fn references_any(expr: &Expr, names: &IndexSet<String>) -> bool {
    if names.is_empty() {
        return false;
    }
    let mut visitor = ReferencesAny {
        names,
        found: false,
    };
    visitor.visit_expr(expr);
    visitor.found
}

#[cfg(test)]
#[path = "../tests/visit.rs"]
mod tests;
