//! Object pattern lowering.
//!
//! ```text
//! const { a, [key()]: b, ...rest } = o;
//! ```
//!
//! becomes
//!
//! ```text
//! const a = o.a, _key = key(), b = o[_key],
//!     rest = _objectWithoutProperties(o, ["a", _key].map(_toPropertyKey));
//! ```

use depat_ast::printer::format_number;
use depat_ast::{Expr, ObjectPattern, Pattern, PropKey, Stmt, assigned_names};
use depat_common::Result;
use rustc_hash::FxHashSet;

use crate::transformer::{BindingKind, LoweringContext, reference_hint};

/// A key the rest object must not contain.
#[derive(Debug, Clone, PartialEq)]
enum ExcludedKey {
    /// Known while lowering
    Static(String),
    /// Only known at run time
    Dynamic(Expr),
}

impl LoweringContext<'_> {
    pub(crate) fn lower_object(
        &mut self,
        pattern: &Pattern,
        object: &ObjectPattern,
        reference: Expr,
    ) -> Result<()> {
        if object.properties.is_empty() && object.rest.is_none() {
            // `{} = null` must still throw
            let check = self.helper("objectDestructuringEmpty")?;
            self.emit(Stmt::expr(Expr::call(check, vec![reference])));
            return Ok(());
        }

        let reference = self.plan_reference(pattern, reference);
        let has_rest = object.rest.is_some();
        let written = if has_rest {
            assigned_names(pattern)
        } else {
            FxHashSet::default()
        };
        let mut excluded: Vec<ExcludedKey> = Vec::new();

        for prop in &object.properties {
            let key = match &prop.key {
                PropKey::Computed { expr } if has_rest && self.key_needs_temp(expr, &written) => {
                    let hint = reference_hint(expr);
                    let temp = self.declare_temp(&hint, (**expr).clone());
                    PropKey::computed(Expr::Ident(temp))
                }
                key => key.clone(),
            };
            if has_rest {
                let key = excluded_key(&key);
                if !matches!(&key, ExcludedKey::Static(_)) || !excluded.contains(&key) {
                    excluded.push(key);
                }
            }
            self.lower_pattern(&prop.value, Expr::member(reference.clone(), key))?;
        }

        let Some(rest) = &object.rest else {
            return Ok(());
        };
        let rest_value = if object.properties.is_empty() {
            self.copy_object(reference)?
        } else {
            self.object_without(reference, excluded)?
        };
        tracing::trace!(properties = object.properties.len(), "object rest");
        self.lower_pattern(&rest.target, rest_value)
    }

    /// A computed key is reused in the exclusion list, so anything that could
    /// change or run code between the two uses is captured first.
    fn key_needs_temp(&self, expr: &Expr, written: &FxHashSet<String>) -> bool {
        match expr {
            _ if expr.is_literal() => false,
            Expr::Ident(ident) => {
                self.kind() == BindingKind::Assign || written.contains(&ident.name)
            }
            _ => true,
        }
    }

    /// `_extends({}, (_objectDestructuringEmpty(ref), ref))`
    fn copy_object(&mut self, reference: Expr) -> Result<Expr> {
        let check = self.helper("objectDestructuringEmpty")?;
        let assign = if self.config().use_built_ins {
            Expr::prop(Expr::ident("Object"), "assign")
        } else {
            self.helper("extends")?
        };
        let checked = Expr::sequence(vec![
            Expr::call(check, vec![reference.clone()]),
            reference,
        ]);
        Ok(Expr::call(assign, vec![Expr::empty_object(), checked]))
    }

    /// `_objectWithoutProperties(ref, [keys])`
    fn object_without(&mut self, reference: Expr, excluded: Vec<ExcludedKey>) -> Result<Expr> {
        let all_static = excluded
            .iter()
            .all(|key| matches!(key, ExcludedKey::Static(_)));
        let keys = Expr::array(
            excluded
                .into_iter()
                .map(|key| match key {
                    ExcludedKey::Static(name) => Expr::string(name),
                    ExcludedKey::Dynamic(expr) => expr,
                })
                .collect(),
        );
        let keys = if all_static {
            keys
        } else {
            let to_key = self.helper("toPropertyKey")?;
            Expr::method_call(keys, "map", vec![to_key])
        };
        let without = if self.config().object_rest_no_symbols {
            self.helper("objectWithoutPropertiesLoose")?
        } else {
            self.helper("objectWithoutProperties")?
        };
        Ok(Expr::call(without, vec![reference, keys]))
    }
}

fn excluded_key(key: &PropKey) -> ExcludedKey {
    match key {
        PropKey::Ident { name } => ExcludedKey::Static(name.clone()),
        PropKey::Str { value } => ExcludedKey::Static(value.clone()),
        PropKey::Num { value } => ExcludedKey::Static(format_number(*value)),
        PropKey::Computed { expr } => match &**expr {
            Expr::Str { value } => ExcludedKey::Static(value.clone()),
            Expr::Num { value } => ExcludedKey::Static(format_number(*value)),
            Expr::Bool { value } => ExcludedKey::Static(value.to_string()),
            Expr::Null => ExcludedKey::Static("null".to_string()),
            other => ExcludedKey::Dynamic(other.clone()),
        },
    }
}

#[cfg(test)]
#[path = "../tests/object.rs"]
mod tests;
