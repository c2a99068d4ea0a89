//! `var`/`let`/`const` declarations with pattern declarators.

use depat_ast::{Expr, Stmt, VarDecl, binding_names};
use depat_common::Result;

use super::{idents, merge_declarations};
use crate::capabilities::LoweringEnv;
use crate::classify::Classify;
use crate::transformer::BindingKind;

pub fn has_pattern(decl: &VarDecl) -> bool {
    decl.decls
        .iter()
        .any(|declarator| declarator.id.classify().is_destructuring())
}

/// Replacement statements for `decl`, declarators lowered in order.
///
/// ```text
/// let a = 1, { b } = o;   =>   let a = 1, b = o.b;
/// ```
pub fn lower_declaration(decl: &VarDecl, env: &mut LoweringEnv<'_>) -> Result<Vec<Stmt>> {
    let mut stmts: Vec<Stmt> = Vec::new();
    let mut introduced = Vec::new();

    for declarator in &decl.decls {
        if !declarator.id.classify().is_destructuring() {
            stmts.push(Stmt::Var(VarDecl {
                kind: decl.kind,
                decls: vec![declarator.clone()],
            }));
            continue;
        }
        // a missing initializer destructures `void 0`
        let init = declarator.init.clone().unwrap_or(Expr::Undefined);
        let mut ctx = env.context(BindingKind::Declare(decl.kind));
        ctx.lower_pattern(&declarator.id, init)?;
        let (lowered, temps) = ctx.finish();
        stmts.extend(lowered);
        introduced.extend(temps);
        introduced.extend(idents(binding_names(&declarator.id)));
    }

    let stmts = merge_declarations(stmts, decl.kind);
    env.register(&introduced);
    tracing::debug!(
        site = "declaration",
        kind = decl.kind.as_str(),
        declarators = decl.decls.len(),
        statements = stmts.len(),
        "lowered"
    );
    Ok(stmts)
}
