//! Binding-target classification.

use depat_ast::{ForHead, Pattern, RestElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Identifier,
    Array,
    Object,
    /// Target with a default value
    Assignment,
    Rest,
    /// Opaque expression target such as `obj.a`, or no target at all
    NotAPattern,
}

impl PatternKind {
    /// Whether the target needs lowering.
    pub const fn is_destructuring(self) -> bool {
        matches!(self, Self::Array | Self::Object | Self::Assignment)
    }
}

pub trait Classify {
    fn classify(&self) -> PatternKind;
}

impl Classify for Pattern {
    fn classify(&self) -> PatternKind {
        match self {
            Self::Ident(_) => PatternKind::Identifier,
            Self::Array(_) => PatternKind::Array,
            Self::Object(_) => PatternKind::Object,
            Self::Assign(_) => PatternKind::Assignment,
            Self::Expr { .. } => PatternKind::NotAPattern,
        }
    }
}

impl Classify for RestElement {
    fn classify(&self) -> PatternKind {
        PatternKind::Rest
    }
}

impl<T: Classify> Classify for Option<T> {
    fn classify(&self) -> PatternKind {
        self.as_ref().map_or(PatternKind::NotAPattern, Classify::classify)
    }
}

impl<T: Classify + ?Sized> Classify for Box<T> {
    fn classify(&self) -> PatternKind {
        (**self).classify()
    }
}

/// A loop head classifies as its single declarator's target.
impl Classify for ForHead {
    fn classify(&self) -> PatternKind {
        match self {
            Self::Var(decl) => match decl.decls.as_slice() {
                [declarator] => declarator.id.classify(),
                _ => PatternKind::NotAPattern,
            },
            Self::Pattern { pattern } => pattern.classify(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/classify.rs"]
mod tests;
