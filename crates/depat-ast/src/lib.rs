//! JavaScript syntax tree for the depat destructuring lowering.
//!
//! - Tree types (`Pattern`, `Expr`, `Stmt`, `Program`), serializable to
//!   `"type"`-tagged JSON
//! - Builder helpers on the tree types
//! - Read-only queries (bound names, identifier collection, reference checks)
//! - A printer producing JavaScript text for inspection and tests

pub mod ast;
pub use ast::*;

// Constructors and predicates on the tree types
pub mod builders;

// Tree walking and the queries built on it
pub mod visit;
pub use visit::{
    Visit, assigned_names, binding_names, collect_identifiers, declaration_binding_names,
    references_any,
};

pub mod printer;
pub use printer::Printer;
