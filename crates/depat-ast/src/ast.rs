//! Syntax tree consumed and produced by the destructuring lowering.
//!
//! The tree covers the JavaScript subset the lowering reads and writes:
//! binding patterns, the expressions that appear as their sources and
//! defaults, and the statements that host them. Everything serializes to
//! `"type"`-tagged JSON, which is the interchange format of the `depat` CLI.
//!
//! Rest elements only exist in the trailing `rest` slot of [`ArrayPattern`]
//! and [`ObjectPattern`], so a rest element in a non-final position cannot be
//! represented.

use serde::{Deserialize, Serialize};

/// Identifier: `foo`, `_ref`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
}

// =========================================================================
// Patterns
// =========================================================================

/// Binding target of a declaration, assignment, loop head or catch clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Plain identifier target: `x`
    Ident(Ident),

    /// Array pattern: `[a, , b, ...rest]`
    Array(ArrayPattern),

    /// Object pattern: `{ a, b: c, ...rest }`
    Object(ObjectPattern),

    /// Pattern with a default: `a = 1`
    Assign(AssignPattern),

    /// Opaque expression target, only valid in assignments: `obj.a`, `arr[0]`
    Expr { expr: Box<Expr> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPattern {
    /// `None` is a hole
    pub elements: Vec<Option<Pattern>>,
    #[serde(default)]
    pub rest: Option<Box<RestElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPattern {
    pub properties: Vec<PatternProp>,
    #[serde(default)]
    pub rest: Option<Box<RestElement>>,
}

/// `key: value` inside an object pattern; shorthand `{ a }` has value `a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternProp {
    pub key: PropKey,
    pub value: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignPattern {
    pub target: Box<Pattern>,
    #[serde(rename = "default")]
    pub default_value: Box<Expr>,
}

/// `...target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestElement {
    pub target: Pattern,
}

/// Property key of an object pattern, object literal or member access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropKey {
    /// `a` (`obj.a` in member position)
    Ident { name: String },
    /// `"a"` (`obj["a"]`)
    Str { value: String },
    /// `0` (`obj[0]`)
    Num { value: f64 },
    /// `[expr]`
    Computed { expr: Box<Expr> },
}

// =========================================================================
// Expressions
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Ident(Ident),

    /// `null`
    Null,
    /// `true`, `false`
    Bool { value: bool },
    /// `42`, `1.5`
    Num { value: f64 },
    /// `"hello"`
    Str { value: String },
    /// `void 0`
    Undefined,
    /// `this`
    This,

    /// Array literal; `None` is a hole: `[a, , ...b]`
    Array { elements: Vec<Option<ExprOrSpread>> },

    /// Object literal: `{ a: 1, ...b }`
    Object { props: Vec<ObjectMember> },

    /// `object.name`, `object[expr]`
    Member {
        object: Box<Expr>,
        property: PropKey,
    },

    /// `callee(args)`
    Call {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<ExprOrSpread>,
    },

    /// `target = value`; compound operators only with non-pattern targets
    Assign {
        #[serde(default = "default_assign_operator")]
        operator: String,
        target: Box<Pattern>,
        value: Box<Expr>,
    },

    /// `(a, b, c)`
    Sequence { exprs: Vec<Expr> },

    /// `test ? consequent : alternate`
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },

    /// `left op right` for arithmetic, comparison and equality operators
    Binary {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `left || right`, `left && right`, `left ?? right`
    Logical {
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `!x`, `-x`, `typeof x`, `void x`
    Unary { operator: String, argument: Box<Expr> },

    /// `function name(params) { body }`
    Function(Function),

    /// `(params) => body`
    Arrow {
        #[serde(default)]
        params: Vec<Pattern>,
        body: ArrowBody,
    },
}

fn default_assign_operator() -> String {
    "=".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprOrSpread {
    #[serde(default)]
    pub spread: bool,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectMember {
    /// `key: value`
    KeyValue { key: PropKey, value: Expr },
    /// `...expr`
    Spread { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArrowBody {
    Expr { expr: Box<Expr> },
    Block { body: Vec<Stmt> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub name: Option<Ident>,
    #[serde(default)]
    pub params: Vec<Pattern>,
    pub body: Vec<Stmt>,
}

// =========================================================================
// Statements
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    /// `expr;`
    Expr { expr: Expr },

    /// `var a = 1, b = 2;`
    Var(VarDecl),

    /// `{ body }`
    Block { body: Vec<Stmt> },

    /// `if (test) consequent else alternate`
    If {
        test: Expr,
        consequent: Box<Stmt>,
        #[serde(default)]
        alternate: Option<Box<Stmt>>,
    },

    /// `for (init; test; update) body`
    For {
        #[serde(default)]
        init: Option<ForInit>,
        #[serde(default)]
        test: Option<Expr>,
        #[serde(default)]
        update: Option<Expr>,
        body: Box<Stmt>,
    },

    /// `for (left in right) body`
    ForIn(ForInOf),

    /// `for (left of right) body`
    ForOf(ForInOf),

    /// `while (test) body`
    While { test: Expr, body: Box<Stmt> },

    /// `try { block } catch (param) { body } finally { finalizer }`
    Try(TryStmt),

    /// `return argument;`
    Return {
        #[serde(default)]
        argument: Option<Expr>,
    },

    /// `throw argument;`
    Throw { argument: Expr },

    /// `break label;`
    Break {
        #[serde(default)]
        label: Option<Ident>,
    },

    /// `continue label;`
    Continue {
        #[serde(default)]
        label: Option<Ident>,
    },

    /// `function name(params) { body }`
    Function(Function),

    /// `export const a = 1;` or `export { a, b as c };`
    ExportNamed(ExportNamed),

    /// `;`
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub kind: VarKind,
    pub decls: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDeclarator {
    pub id: Pattern,
    #[serde(default)]
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForInit {
    Var(VarDecl),
    Expr { expr: Expr },
}

/// Shared body of `for…in` and `for…of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForInOf {
    pub left: ForHead,
    pub right: Expr,
    pub body: Box<Stmt>,
}

/// Left side of `for…in` / `for…of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForHead {
    /// `for (const x of xs)`: a declaration with a single declarator and no initializer
    Var(VarDecl),
    /// `for (x of xs)`, `for ({ a } of xs)`
    Pattern { pattern: Pattern },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    pub block: Vec<Stmt>,
    #[serde(default)]
    pub handler: Option<CatchClause>,
    #[serde(default)]
    pub finalizer: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    /// `None` for `catch { … }`
    #[serde(default)]
    pub param: Option<Pattern>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNamed {
    #[serde(default)]
    pub declaration: Option<VarDecl>,
    #[serde(default)]
    pub specifiers: Vec<ExportSpecifier>,
}

/// `local as exported`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpecifier {
    pub local: Ident,
    pub exported: Ident,
}

/// A compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
