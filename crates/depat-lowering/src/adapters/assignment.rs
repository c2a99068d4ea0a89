//! Assignment expressions with a pattern on the left.
//!
//! In statement position the assignment becomes plain statements. Anywhere
//! else its value is observable, so the right-hand side is captured and the
//! lowering is folded into one sequence expression ending in that capture:
//!
//! ```text
//! f([a, b] = xs);
//! ```
//!
//! becomes (with `var _ref, _iterator, ...;` hoisted before the statement)
//!
//! ```text
//! f((_ref = xs, _iterator = _getIterator(_ref), ..., _ref));
//! ```

use depat_ast::{Expr, Ident, Pattern, Stmt, VarDecl};
use depat_common::Result;

use crate::capabilities::LoweringEnv;
use crate::transformer::BindingKind;

/// An expression plus the temporaries it assigns, to be declared with `var`
/// ahead of the enclosing statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredExpr {
    pub hoisted: Vec<Ident>,
    pub expr: Expr,
}

/// `pattern = value;` as an expression statement.
pub fn lower_assignment_statement(
    target: &Pattern,
    value: &Expr,
    env: &mut LoweringEnv<'_>,
) -> Result<Vec<Stmt>> {
    let mut ctx = env.context(BindingKind::Assign);
    ctx.lower_pattern(target, value.clone())?;
    let (stmts, temps) = ctx.finish();
    env.register(&temps);
    tracing::debug!(site = "assignment", statements = stmts.len(), "lowered");
    Ok(stmts)
}

/// `pattern = value` where the result of the assignment is used.
pub fn lower_assignment_value(
    target: &Pattern,
    value: &Expr,
    env: &mut LoweringEnv<'_>,
) -> Result<LoweredExpr> {
    let mut ctx = env.context(BindingKind::Assign);
    let reference = ctx.declare_temp("ref", value.clone());
    if matches!(value, Expr::Array { .. }) {
        ctx.mark_array(&reference);
    }
    ctx.lower_pattern(target, Expr::Ident(reference.clone()))?;
    let (stmts, temps) = ctx.finish();

    let mut hoisted = Vec::new();
    let mut exprs = Vec::with_capacity(stmts.len() + 1);
    for stmt in stmts {
        match stmt {
            Stmt::Var(decl) if all_identifiers(&decl) => {
                for declarator in decl.decls {
                    let Pattern::Ident(name) = declarator.id else {
                        continue;
                    };
                    if let Some(init) = declarator.init {
                        exprs.push(Expr::assign_ident(&name, init));
                    }
                    hoisted.push(name);
                }
            }
            Stmt::Expr { expr } => exprs.push(expr),
            // no expression form, e.g. the rest-drain loop
            other => exprs.push(Expr::arrow_iife(vec![other])),
        }
    }
    exprs.push(Expr::Ident(reference));

    env.register(&temps);
    tracing::debug!(
        site = "assignment-value",
        hoisted = hoisted.len(),
        parts = exprs.len(),
        "lowered"
    );
    Ok(LoweredExpr {
        hoisted,
        expr: Expr::sequence(exprs),
    })
}

fn all_identifiers(decl: &VarDecl) -> bool {
    decl.decls
        .iter()
        .all(|declarator| matches!(declarator.id, Pattern::Ident(_)))
}
