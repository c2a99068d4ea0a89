//! Per-call-site lowering context and the recursive pattern walk.
//!
//! A [`LoweringContext`] is created for one destructuring site, fed one
//! pattern and one source expression, and consumed into the flat statement
//! list that replaces the pattern. Emission is pre-order: a parent's reads
//! come before its children's, siblings left to right.
//!
//! The object and array destructurers live in [`crate::object`] and
//! [`crate::array`] as further `impl LoweringContext` blocks.

use depat_ast::{AssignPattern, Expr, Ident, Pattern, PropKey, Stmt, VarKind, assigned_names};
use depat_common::{ResolvedConfig, Result};
use rustc_hash::FxHashSet;

use crate::array::ArrayStrategy;
use crate::capabilities::{HelperRequester, NameGenerator};

/// How the leaves of a pattern are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Declare new bindings with this declaration kind
    Declare(VarKind),
    /// Assign to bindings that already exist
    Assign,
}

pub struct LoweringContext<'c> {
    kind: BindingKind,
    /// Emission sink, append-only until [`finish`](Self::finish)
    nodes: Vec<Stmt>,
    config: ResolvedConfig,
    names: &'c mut dyn NameGenerator,
    helpers: &'c mut dyn HelperRequester,
    /// Temporaries holding array literals
    array_refs: FxHashSet<String>,
    /// Every temporary introduced, in creation order
    temps: Vec<Ident>,
}

impl<'c> LoweringContext<'c> {
    pub fn new(
        kind: BindingKind,
        config: ResolvedConfig,
        names: &'c mut dyn NameGenerator,
        helpers: &'c mut dyn HelperRequester,
    ) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            config,
            names,
            helpers,
            array_refs: FxHashSet::default(),
            temps: Vec::new(),
        }
    }

    pub const fn kind(&self) -> BindingKind {
        self.kind
    }

    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Lower `pattern` against `reference` and return the statements.
    pub fn lower(mut self, pattern: &Pattern, reference: Expr) -> Result<Vec<Stmt>> {
        self.lower_pattern(pattern, reference)?;
        Ok(self.nodes)
    }

    /// Emitted statements and the temporaries they introduce.
    pub fn finish(self) -> (Vec<Stmt>, Vec<Ident>) {
        (self.nodes, self.temps)
    }

    /// Record that `ident` holds a plain array, so reads use indices.
    pub fn mark_array(&mut self, ident: &Ident) {
        self.array_refs.insert(ident.name.clone());
    }

    pub fn is_known_array(&self, name: &str) -> bool {
        self.array_refs.contains(name)
    }

    /// Emit `var _hint = init;` and return the new name.
    pub fn declare_temp(&mut self, hint: &str, init: Expr) -> Ident {
        let temp = self.names.fresh_identifier(hint);
        tracing::trace!(temp = %temp.name, "temporary");
        self.nodes.push(Stmt::var(VarKind::Var, &temp, Some(init)));
        self.temps.push(temp.clone());
        temp
    }

    /// Fresh name that the caller declares itself.
    pub(crate) fn fresh_temp(&mut self, hint: &str) -> Ident {
        let temp = self.names.fresh_identifier(hint);
        self.temps.push(temp.clone());
        temp
    }

    pub(crate) fn emit(&mut self, stmt: Stmt) {
        self.nodes.push(stmt);
    }

    pub(crate) fn helper(&mut self, name: &str) -> Result<Expr> {
        self.helpers.request_helper(name)
    }

    // =========================================================================
    // Orchestration
    // =========================================================================

    /// Lower one position of a pattern.
    pub fn lower_pattern(&mut self, pattern: &Pattern, reference: Expr) -> Result<()> {
        match pattern {
            Pattern::Ident(_) | Pattern::Expr { .. } => {
                self.bind(pattern, reference);
                Ok(())
            }
            Pattern::Assign(assign) => self.lower_default(pattern, assign, reference),
            Pattern::Array(array) => self.lower_array(pattern, array, reference),
            Pattern::Object(object) => self.lower_object(pattern, object, reference),
        }
    }

    /// `target = ref === void 0 ? default : ref`, the default evaluated only
    /// when it is used.
    fn lower_default(
        &mut self,
        pattern: &Pattern,
        assign: &AssignPattern,
        reference: Expr,
    ) -> Result<()> {
        let value = if reference.is_pure_void() {
            (*assign.default_value).clone()
        } else {
            let reference = self.plan_reference(pattern, reference);
            Expr::conditional(
                Expr::is_undefined(reference.clone()),
                (*assign.default_value).clone(),
                reference,
            )
        };

        match &*assign.target {
            target @ (Pattern::Ident(_) | Pattern::Expr { .. }) => {
                self.bind(target, value);
                Ok(())
            }
            inner => {
                let hint = reference_hint(&value);
                let temp = self.declare_temp(&hint, value);
                self.lower_pattern(inner, Expr::Ident(temp))
            }
        }
    }

    /// Bind a leaf target according to the binding kind. Expression targets
    /// are always assigned.
    pub(crate) fn bind(&mut self, target: &Pattern, value: Expr) {
        let stmt = match (self.kind, target) {
            (BindingKind::Declare(kind), Pattern::Ident(ident)) => {
                Stmt::var(kind, ident, Some(value))
            }
            _ => Stmt::expr(Expr::assign(target.clone(), value)),
        };
        self.nodes.push(stmt);
    }

    // =========================================================================
    // Reference planning
    // =========================================================================

    /// Return a reference that `pattern` may read as often as it needs while
    /// `reference` itself is evaluated exactly once.
    pub fn plan_reference(&mut self, pattern: &Pattern, reference: Expr) -> Expr {
        let rereadable = reference.is_simple() && !self.overwrites(pattern, &reference);
        if rereadable || !self.reads_more_than_once(pattern, &reference) {
            return reference;
        }
        let is_array_literal = matches!(reference, Expr::Array { .. });
        let hint = reference_hint(&reference);
        let temp = self.declare_temp(&hint, reference);
        if is_array_literal {
            self.mark_array(&temp);
        }
        Expr::Ident(temp)
    }

    /// Whether `pattern` writes the identifier it reads from before its last
    /// read, as in `({ a: o, b } = o)`.
    fn overwrites(&self, pattern: &Pattern, reference: &Expr) -> bool {
        let Expr::Ident(source) = reference else {
            return false;
        };
        // the iterator is taken before any element is bound
        if matches!(pattern, Pattern::Array(_))
            && self.array_strategy(reference) == ArrayStrategy::Iterator
        {
            return false;
        }
        assigned_names(pattern).contains(&source.name)
    }

    fn reads_more_than_once(&self, pattern: &Pattern, reference: &Expr) -> bool {
        match pattern {
            Pattern::Ident(_) | Pattern::Expr { .. } => false,
            // compared, then used
            Pattern::Assign(_) => true,
            Pattern::Object(object) => !object.properties.is_empty() || object.rest.is_some(),
            Pattern::Array(array) => match self.array_strategy(reference) {
                ArrayStrategy::Iterator => true,
                // zero consumers still evaluates the source once
                ArrayStrategy::Index => {
                    let consumers = array.elements.iter().flatten().count()
                        + usize::from(array.rest.is_some());
                    consumers != 1
                }
            },
        }
    }
}

/// Readable base name for a temporary holding `expr`: `o.a` gives `o$a`,
/// `f()` gives `f`.
pub(crate) fn reference_hint(expr: &Expr) -> String {
    match expr {
        Expr::Ident(ident) => ident.name.clone(),
        Expr::This => "this".to_string(),
        Expr::Member { object, property } => {
            let base = reference_hint(object);
            match property {
                PropKey::Ident { name } => join_hint(&base, name),
                PropKey::Str { value } => join_hint(&base, value),
                PropKey::Computed { expr } => join_hint(&base, &reference_hint(expr)),
                PropKey::Num { .. } => base,
            }
        }
        Expr::Call { callee, .. } => reference_hint(callee),
        Expr::Conditional { alternate, .. } => reference_hint(alternate),
        Expr::Assign { value, .. } => reference_hint(value),
        _ => "ref".to_string(),
    }
}

fn join_hint(base: &str, name: &str) -> String {
    if base == "ref" {
        name.to_string()
    } else {
        format!("{base}${name}")
    }
}

#[cfg(test)]
#[path = "../tests/transformer.rs"]
mod tests;
