//! Array pattern lowering.
//!
//! Three shapes, tried in order:
//!
//! 1. **Unpacking**: the source is an array literal whose elements line up
//!    with the pattern, so each element binds its literal directly.
//! 2. **Index**: the source is known to be a plain array (or every iterable
//!    is assumed to be one); elements read `ref[i]`, a rest reads
//!    `ref.slice(i)`.
//! 3. **Iterator**: the general case. The iterator is obtained once and
//!    advanced once per position; once a step reports `done`, later positions
//!    reuse that step instead of advancing again. Each step's `done` is read
//!    once into a temporary.
//!
//! ```text
//! const [a, , b = 1] = xs;
//! ```
//!
//! with the iterator protocol becomes
//!
//! ```text
//! const _iterator = _getIterator(xs), _step = _iterator.next(), _done = _step.done,
//!     a = _done ? void 0 : _step.value,
//!     _step2 = _done ? _step : _iterator.next(), _done2 = _done || _step2.done,
//!     _step3 = _done2 ? _step2 : _iterator.next(), _done3 = _done2 || _step3.done,
//!     _step3$value = _done3 ? void 0 : _step3.value,
//!     b = _step3$value === void 0 ? 1 : _step3$value;
//! _done3 || _iterator.return == null || _iterator.return();
//! ```

use depat_ast::{
    ArrayPattern, Expr, ExprOrSpread, ForInit, Ident, Pattern, PropKey, Stmt, VarDecl, VarKind,
    binding_names, references_any,
};
use depat_common::Result;
use indexmap::IndexSet;

use crate::transformer::LoweringContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStrategy {
    /// `ref[i]` and `ref.slice(i)`
    Index,
    /// `next()` per position
    Iterator,
}

impl ArrayStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Iterator => "iterator",
        }
    }
}

impl LoweringContext<'_> {
    pub(crate) fn lower_array(
        &mut self,
        pattern: &Pattern,
        array: &ArrayPattern,
        reference: Expr,
    ) -> Result<()> {
        if let Expr::Array { elements } = &reference {
            if can_unpack(array, elements) {
                tracing::trace!(elements = array.elements.len(), "array literal unpacked");
                let elements = elements.clone();
                return self.lower_unpacked(array, elements);
            }
        }

        let strategy = self.array_strategy(&reference);
        tracing::trace!(strategy = strategy.as_str(), "array pattern");
        let reference = self.plan_reference(pattern, reference);
        match strategy {
            ArrayStrategy::Index => self.lower_indexed(array, reference),
            ArrayStrategy::Iterator => self.lower_iterated(array, reference),
        }
    }

    /// Index reads are used when the source is provably a plain array.
    pub fn array_strategy(&self, reference: &Expr) -> ArrayStrategy {
        let provably_array = match reference {
            Expr::Array { .. } => true,
            Expr::Ident(ident) => ident.name == "arguments" || self.is_known_array(&ident.name),
            _ => false,
        };
        if self.config().iterable_is_array || provably_array {
            ArrayStrategy::Index
        } else {
            ArrayStrategy::Iterator
        }
    }

    fn lower_unpacked(
        &mut self,
        array: &ArrayPattern,
        mut elements: Vec<Option<ExprOrSpread>>,
    ) -> Result<()> {
        let rest_elements = elements.split_off(array.elements.len().min(elements.len()));
        for (element, value) in array.elements.iter().zip(elements) {
            let value = value.map_or(Expr::Undefined, |value| value.expr);
            if let Some(element) = element {
                self.lower_pattern(element, value)?;
            }
        }
        if let Some(rest) = &array.rest {
            self.lower_pattern(
                &rest.target,
                Expr::Array {
                    elements: rest_elements,
                },
            )?;
        }
        Ok(())
    }

    fn lower_indexed(&mut self, array: &ArrayPattern, reference: Expr) -> Result<()> {
        for (index, element) in array.elements.iter().enumerate() {
            // holes consume an index
            if let Some(element) = element {
                self.lower_pattern(element, Expr::index(reference.clone(), index))?;
            }
        }
        if let Some(rest) = &array.rest {
            let start = Expr::index_number(array.elements.len());
            let sliced = match &reference {
                Expr::Ident(ident) if ident.name == "arguments" => Expr::method_call(
                    Expr::prop(
                        Expr::prop(Expr::ident("Array"), "prototype"),
                        "slice",
                    ),
                    "call",
                    vec![reference.clone(), start],
                ),
                _ => Expr::method_call(reference.clone(), "slice", vec![start]),
            };
            self.lower_pattern(&rest.target, sliced)?;
        }
        Ok(())
    }

    fn lower_iterated(&mut self, array: &ArrayPattern, reference: Expr) -> Result<()> {
        let acquire = self.acquire_iterator(reference)?;
        let iterator = Expr::Ident(self.declare_temp("iterator", acquire));
        let next = || Expr::method_call(iterator.clone(), "next", Vec::new());

        // `done` is read once per step result and carried forward; after it is
        // set, a position reuses the previous step instead of advancing.
        let mut previous: Option<(Ident, Ident)> = None;
        for element in &array.elements {
            let advance = match &previous {
                Some((step, done)) => Expr::conditional(
                    Expr::Ident(done.clone()),
                    Expr::Ident(step.clone()),
                    next(),
                ),
                None => next(),
            };
            let step = self.declare_temp("step", advance);
            let step_done = Expr::prop(Expr::Ident(step.clone()), "done");
            let done_init = match &previous {
                Some((_, done)) => Expr::logical_or(Expr::Ident(done.clone()), step_done),
                None => step_done,
            };
            let done = self.declare_temp("done", done_init);
            if let Some(element) = element {
                let value = Expr::conditional(
                    Expr::Ident(done.clone()),
                    Expr::Undefined,
                    Expr::prop(Expr::Ident(step.clone()), "value"),
                );
                self.lower_pattern(element, value)?;
            }
            previous = Some((step, done));
        }

        if let Some(rest) = &array.rest {
            let collected = self.declare_temp("rest", Expr::empty_array());
            let step = self.fresh_temp("step");
            let drain = Stmt::For {
                init: Some(ForInit::Var(VarDecl::single(
                    VarKind::Var,
                    Pattern::Ident(step.clone()),
                    Some(next()),
                ))),
                test: Some(Expr::not(Expr::prop(Expr::Ident(step.clone()), "done"))),
                update: Some(Expr::assign_ident(&step, next())),
                body: Box::new(Stmt::expr(Expr::method_call(
                    Expr::Ident(collected.clone()),
                    "push",
                    vec![Expr::prop(Expr::Ident(step), "value")],
                ))),
            };
            let drain = match &previous {
                // an exhausted iterator is not advanced again
                Some((_, done)) => Stmt::If {
                    test: Expr::not(Expr::Ident(done.clone())),
                    consequent: Box::new(drain),
                    alternate: None,
                },
                None => drain,
            };
            self.emit(drain);
            return self.lower_pattern(&rest.target, Expr::Ident(collected));
        }

        // Normal completion closes an iterator that is not exhausted.
        let has_return = Expr::prop(iterator.clone(), "return");
        let close = Expr::logical_or(
            Expr::binary(has_return, "==", Expr::Null),
            Expr::method_call(iterator.clone(), "return", Vec::new()),
        );
        let close = match previous {
            Some((_, done)) => Expr::logical_or(Expr::Ident(done), close),
            None => close,
        };
        self.emit(Stmt::expr(close));
        Ok(())
    }

    fn acquire_iterator(&mut self, reference: Expr) -> Result<Expr> {
        if self.config().array_like_is_iterable {
            let get_iterator = self.helper("getIterator")?;
            let maybe_array_like = self.helper("maybeArrayLike")?;
            Ok(Expr::call(maybe_array_like, vec![get_iterator, reference]))
        } else if self.config().use_built_ins {
            let symbol_iterator =
                PropKey::computed(Expr::prop(Expr::ident("Symbol"), "iterator"));
            Ok(Expr::call(Expr::member(reference, symbol_iterator), Vec::new()))
        } else {
            let get_iterator = self.helper("getIterator")?;
            Ok(Expr::call(get_iterator, vec![reference]))
        }
    }
}

/// Whether the literal elements can be bound position by position without
/// changing what any element observes.
pub fn can_unpack(array: &ArrayPattern, literal: &[Option<ExprOrSpread>]) -> bool {
    let pattern_len = array.elements.len() + usize::from(array.rest.is_some());
    if pattern_len > literal.len() {
        return false;
    }
    if pattern_len < literal.len() && array.rest.is_none() {
        return false;
    }
    // holes and member targets
    if array
        .elements
        .iter()
        .any(|element| matches!(element, None | Some(Pattern::Expr { .. })))
    {
        return false;
    }
    let mut values = literal.iter().flatten();
    if values.clone().any(|value| {
        value.spread || matches!(value.expr, Expr::Call { .. } | Expr::Member { .. })
    }) {
        return false;
    }
    // `[a, b] = [b, a]` must read both before writing either
    let mut bound = IndexSet::new();
    for element in array.elements.iter().flatten() {
        bound.extend(binding_names(element));
    }
    if let Some(rest) = &array.rest {
        bound.extend(binding_names(&rest.target));
    }
    !values.any(|value| references_any(&value.expr, &bound))
}

#[cfg(test)]
#[path = "../tests/array.rs"]
mod tests;
