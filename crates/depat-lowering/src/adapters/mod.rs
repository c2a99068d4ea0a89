//! Call-site adapters.
//!
//! Each adapter recognizes one syntactic home of a pattern, runs a fresh
//! [`LoweringContext`](crate::LoweringContext) over it, and returns the
//! replacement nodes. The adapters register every binding they introduce
//! with the scope registrar once the replacement is built.

pub mod assignment;
pub mod catch;
pub mod declaration;
pub mod export;
pub mod loops;

pub use assignment::{LoweredExpr, lower_assignment_statement, lower_assignment_value};
pub use catch::lower_catch_clause;
pub use declaration::{has_pattern, lower_declaration};
pub use export::split_export;
pub use loops::{ForInitLowering, lower_for_in_of, lower_for_init};

use depat_ast::{Ident, Stmt, VarDecl, VarKind};

/// Fold consecutive declarations into one declaration of `kind`.
///
/// Any other statement ends the run, so the relative order of declarations and
/// side-effecting statements is unchanged.
pub fn merge_declarations(stmts: Vec<Stmt>, kind: VarKind) -> Vec<Stmt> {
    let mut merged: Vec<Stmt> = Vec::with_capacity(stmts.len());
    let mut in_run = false;
    for stmt in stmts {
        match stmt {
            Stmt::Var(decl) => {
                if in_run {
                    if let Some(Stmt::Var(tail)) = merged.last_mut() {
                        tail.decls.extend(decl.decls);
                        continue;
                    }
                }
                merged.push(Stmt::Var(VarDecl {
                    kind,
                    decls: decl.decls,
                }));
                in_run = true;
            }
            other => {
                merged.push(other);
                in_run = false;
            }
        }
    }
    merged
}

/// Statements to run first, then `body`, as one block.
pub(crate) fn prepend_to_body(mut prelude: Vec<Stmt>, body: &Stmt) -> Stmt {
    match body {
        Stmt::Block { body } => prelude.extend(body.iter().cloned()),
        Stmt::Empty => {}
        other => prelude.push(other.clone()),
    }
    Stmt::Block { body: prelude }
}

pub(crate) fn idents(names: impl IntoIterator<Item = String>) -> impl Iterator<Item = Ident> {
    names.into_iter().map(Ident::new)
}

#[cfg(test)]
#[path = "../../tests/adapters.rs"]
mod tests;
