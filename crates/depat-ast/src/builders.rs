//! Builder helpers for tree construction

use crate::ast::*;

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Expr {
    /// Create an identifier reference
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(Ident::new(name))
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    /// Create a numeric literal
    pub const fn number(value: f64) -> Self {
        Self::Num { value }
    }

    /// Create a numeric literal from an index
    pub fn index_number(index: usize) -> Self {
        Self::Num {
            value: index as f64,
        }
    }

    /// `object.name`
    pub fn prop(object: Self, name: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            property: PropKey::Ident { name: name.into() },
        }
    }

    /// `object[key]`, dot access for identifier keys
    pub fn member(object: Self, property: PropKey) -> Self {
        Self::Member {
            object: Box::new(object),
            property,
        }
    }

    /// `object[index]`
    pub fn index(object: Self, index: usize) -> Self {
        Self::Member {
            object: Box::new(object),
            property: PropKey::Num {
                value: index as f64,
            },
        }
    }

    /// Call without spread arguments
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args: args.into_iter().map(ExprOrSpread::plain).collect(),
        }
    }

    /// `object.method(args)`
    pub fn method_call(object: Self, method: &str, args: Vec<Self>) -> Self {
        Self::call(Self::prop(object, method), args)
    }

    /// `target = value`
    pub fn assign(target: Pattern, value: Self) -> Self {
        Self::Assign {
            operator: "=".to_string(),
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// `name = value`
    pub fn assign_ident(name: &Ident, value: Self) -> Self {
        Self::assign(Pattern::Ident(name.clone()), value)
    }

    pub fn binary(left: Self, operator: impl Into<String>, right: Self) -> Self {
        Self::Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `left === void 0`
    pub fn is_undefined(left: Self) -> Self {
        Self::binary(left, "===", Self::Undefined)
    }

    pub fn logical_or(left: Self, right: Self) -> Self {
        Self::Logical {
            operator: "||".to_string(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(argument: Self) -> Self {
        Self::Unary {
            operator: "!".to_string(),
            argument: Box::new(argument),
        }
    }

    pub fn conditional(test: Self, consequent: Self, alternate: Self) -> Self {
        Self::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    /// Comma expression; a single element is returned unwrapped
    pub fn sequence(mut exprs: Vec<Self>) -> Self {
        if exprs.len() == 1 {
            if let Some(only) = exprs.pop() {
                return only;
            }
        }
        Self::Sequence { exprs }
    }

    /// Array literal without holes or spreads
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array {
            elements: elements
                .into_iter()
                .map(|expr| Some(ExprOrSpread::plain(expr)))
                .collect(),
        }
    }

    pub const fn empty_array() -> Self {
        Self::Array {
            elements: Vec::new(),
        }
    }

    pub const fn empty_object() -> Self {
        Self::Object { props: Vec::new() }
    }

    /// `(() => { body })()`
    pub fn arrow_iife(body: Vec<Stmt>) -> Self {
        Self::call(
            Self::Arrow {
                params: Vec::new(),
                body: ArrowBody::Block { body },
            },
            Vec::new(),
        )
    }

    pub const fn as_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Literal values, identifiers, `this` and `void 0`: reading them twice
    /// has no observable effect.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Ident(_)
                | Self::Null
                | Self::Bool { .. }
                | Self::Num { .. }
                | Self::Str { .. }
                | Self::Undefined
                | Self::This
        )
    }

    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool { .. } | Self::Num { .. } | Self::Str { .. }
        )
    }

    /// `undefined`, `void 0` or `void <literal>`
    pub fn is_pure_void(&self) -> bool {
        match self {
            Self::Undefined => true,
            Self::Ident(ident) => ident.name == "undefined",
            Self::Unary { operator, argument } => {
                operator == "void" && (argument.is_literal() || matches!(**argument, Self::Undefined))
            }
            _ => false,
        }
    }
}

impl ExprOrSpread {
    pub const fn plain(expr: Expr) -> Self {
        Self {
            spread: false,
            expr,
        }
    }

    pub const fn spread(expr: Expr) -> Self {
        Self { spread: true, expr }
    }
}

impl PropKey {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    pub fn computed(expr: Expr) -> Self {
        Self::Computed {
            expr: Box::new(expr),
        }
    }

    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }
}

impl Pattern {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(Ident::new(name))
    }

    pub fn array(elements: Vec<Option<Self>>) -> Self {
        Self::Array(ArrayPattern {
            elements,
            rest: None,
        })
    }

    pub fn array_with_rest(elements: Vec<Option<Self>>, rest: Self) -> Self {
        Self::Array(ArrayPattern {
            elements,
            rest: Some(Box::new(RestElement { target: rest })),
        })
    }

    pub fn object(properties: Vec<PatternProp>) -> Self {
        Self::Object(ObjectPattern {
            properties,
            rest: None,
        })
    }

    pub fn object_with_rest(properties: Vec<PatternProp>, rest: Self) -> Self {
        Self::Object(ObjectPattern {
            properties,
            rest: Some(Box::new(RestElement { target: rest })),
        })
    }

    /// `target = default_value`
    pub fn with_default(self, default_value: Expr) -> Self {
        Self::Assign(AssignPattern {
            target: Box::new(self),
            default_value: Box::new(default_value),
        })
    }

    /// Opaque expression target
    pub fn expr(expr: Expr) -> Self {
        Self::Expr {
            expr: Box::new(expr),
        }
    }
}

impl PatternProp {
    /// `{ name }`
    pub fn shorthand(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: PropKey::ident(name.clone()),
            value: Pattern::ident(name),
        }
    }

    /// `{ key: value }`
    pub fn new(key: PropKey, value: Pattern) -> Self {
        Self { key, value }
    }

    pub const fn computed(&self) -> bool {
        self.key.is_computed()
    }
}

impl Stmt {
    pub const fn expr(expr: Expr) -> Self {
        Self::Expr { expr }
    }

    /// `kind name = init;`
    pub fn var(kind: VarKind, name: &Ident, init: Option<Expr>) -> Self {
        Self::Var(VarDecl {
            kind,
            decls: vec![VarDeclarator {
                id: Pattern::Ident(name.clone()),
                init,
            }],
        })
    }

    pub fn block(body: Vec<Self>) -> Self {
        Self::Block { body }
    }

    /// Wraps several statements in a block; a single statement is returned as is
    pub fn from_list(mut stmts: Vec<Self>) -> Self {
        if stmts.len() == 1 {
            if let Some(only) = stmts.pop() {
                return only;
            }
        }
        Self::Block { body: stmts }
    }
}

impl VarDecl {
    pub fn single(kind: VarKind, id: Pattern, init: Option<Expr>) -> Self {
        Self {
            kind,
            decls: vec![VarDeclarator { id, init }],
        }
    }
}
