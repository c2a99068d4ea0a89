//! Services the lowering consumes from its host.
//!
//! The lowering never decides on its own which names are free, which runtime
//! helpers exist, or where bindings are recorded. Each of those is a trait so
//! a host compiler can plug in its own scope tracker and helper injector; the
//! default implementations here are what the [`pass`](crate::pass) and the CLI
//! use.

use depat_ast::{Expr, Ident};
use depat_common::{LoweringError, ResolvedConfig, Result};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::transformer::{BindingKind, LoweringContext};

// =========================================================================
// Names
// =========================================================================

/// Source of fresh identifiers, unique within a compilation unit.
pub trait NameGenerator {
    /// A name derived from `hint` that collides with nothing in the unit.
    fn fresh_identifier(&mut self, hint: &str) -> Ident;
}

/// Generates `_hint`, `_hint2`, `_hint3`, ... skipping every taken name.
#[derive(Debug, Default, Clone)]
pub struct UidGenerator {
    taken: FxHashSet<String>,
}

impl UidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that never hands out any of `names`.
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

impl NameGenerator for UidGenerator {
    fn fresh_identifier(&mut self, hint: &str) -> Ident {
        let base = sanitize_hint(hint);
        let mut counter = 1usize;
        loop {
            let candidate = if counter == 1 {
                format!("_{base}")
            } else {
                format!("_{base}{counter}")
            };
            if self.taken.insert(candidate.clone()) {
                tracing::trace!(hint, name = %candidate, "fresh identifier");
                return Ident::new(candidate);
            }
            counter += 1;
        }
    }
}

/// Reduce a hint to identifier characters, without leading underscores or a
/// numeric suffix, so `_ref2` hints back to `ref`.
fn sanitize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    let trimmed = cleaned
        .trim_start_matches('_')
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_matches('$');
    if trimmed.is_empty() {
        "ref".to_string()
    } else {
        trimmed.to_string()
    }
}

// =========================================================================
// Helpers
// =========================================================================

/// Runtime helpers the lowering may ask for.
pub const KNOWN_HELPERS: &[&str] = &[
    "objectWithoutProperties",
    "objectWithoutPropertiesLoose",
    "toPropertyKey",
    "extends",
    "objectDestructuringEmpty",
    "getIterator",
    "maybeArrayLike",
];

/// Provider of runtime helper functions.
pub trait HelperRequester {
    /// Expression referencing helper `name`, or `MissingHelper` when the
    /// target cannot provide it.
    fn request_helper(&mut self, name: &str) -> Result<Expr>;
}

/// Helper provider that references helper `name` as the identifier `_name`
/// and remembers what was requested, in request order.
#[derive(Debug, Clone)]
pub struct HelperRegistry {
    available: FxHashSet<String>,
    requested: IndexSet<String>,
}

impl HelperRegistry {
    /// Registry providing every helper in [`KNOWN_HELPERS`].
    pub fn new() -> Self {
        Self::with_available(KNOWN_HELPERS.iter().copied())
    }

    pub fn with_available<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: names.into_iter().map(Into::into).collect(),
            requested: IndexSet::new(),
        }
    }

    /// Remove one helper, e.g. for a runtime that lacks it.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.available.remove(name);
        self
    }

    pub fn requested(&self) -> &IndexSet<String> {
        &self.requested
    }

    pub fn into_requested(self) -> Vec<String> {
        self.requested.into_iter().collect()
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HelperRequester for HelperRegistry {
    fn request_helper(&mut self, name: &str) -> Result<Expr> {
        if !self.available.contains(name) {
            return Err(LoweringError::missing_helper(name));
        }
        if self.requested.insert(name.to_string()) {
            tracing::debug!(helper = name, "helper requested");
        }
        Ok(Expr::ident(format!("_{name}")))
    }
}

// =========================================================================
// Scope
// =========================================================================

/// Receives the bindings a call site introduced after splicing.
pub trait ScopeRegistrar {
    fn register_bindings(&mut self, names: &[Ident]);
}

/// Records registered binding names in registration order.
#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    names: IndexSet<String>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> &IndexSet<String> {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}

impl ScopeRegistrar for BindingRegistry {
    fn register_bindings(&mut self, names: &[Ident]) {
        for ident in names {
            self.names.insert(ident.name.clone());
        }
    }
}

// =========================================================================
// Environment
// =========================================================================

/// Everything one compilation unit shares across its call sites.
pub struct LoweringEnv<'a> {
    pub config: ResolvedConfig,
    pub names: &'a mut dyn NameGenerator,
    pub helpers: &'a mut dyn HelperRequester,
    pub scope: &'a mut dyn ScopeRegistrar,
}

impl<'a> LoweringEnv<'a> {
    pub fn new(
        config: ResolvedConfig,
        names: &'a mut dyn NameGenerator,
        helpers: &'a mut dyn HelperRequester,
        scope: &'a mut dyn ScopeRegistrar,
    ) -> Self {
        Self {
            config,
            names,
            helpers,
            scope,
        }
    }

    /// Fresh per-call-site context borrowing the shared services.
    pub fn context(&mut self, kind: BindingKind) -> LoweringContext<'_> {
        LoweringContext::new(kind, self.config, &mut *self.names, &mut *self.helpers)
    }

    pub fn fresh_identifier(&mut self, hint: &str) -> Ident {
        self.names.fresh_identifier(hint)
    }

    pub fn register(&mut self, names: &[Ident]) {
        if !names.is_empty() {
            self.scope.register_bindings(names);
        }
    }
}

#[cfg(test)]
#[path = "../tests/capabilities.rs"]
mod tests;
