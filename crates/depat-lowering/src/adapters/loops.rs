//! Loop heads: `for…in`/`for…of` bindings and classic `for` initializers.

use depat_ast::{Expr, ForHead, ForInOf, Ident, Pattern, Stmt, VarDecl, VarKind, binding_names};
use depat_common::Result;

use super::{idents, lower_declaration, merge_declarations, prepend_to_body};
use crate::capabilities::LoweringEnv;
use crate::classify::Classify;
use crate::transformer::BindingKind;

/// Rewrite a `for…in`/`for…of` whose head destructures. Each iteration binds
/// a fresh temporary, destructured at the top of the body:
///
/// ```text
/// for (const [k, v] of entries) body
/// // =>
/// for (const _ref of entries) { const _iterator = _getIterator(_ref), …; body }
/// ```
///
/// Returns `None` when the head is a plain binding.
pub fn lower_for_in_of(stmt: &ForInOf, env: &mut LoweringEnv<'_>) -> Result<Option<ForInOf>> {
    if !stmt.left.classify().is_destructuring() {
        return Ok(None);
    }

    let (kind, binding, pattern) = match &stmt.left {
        ForHead::Var(decl) => match decl.decls.as_slice() {
            [declarator] => (decl.kind, BindingKind::Declare(decl.kind), &declarator.id),
            _ => return Ok(None),
        },
        ForHead::Pattern { pattern } => (VarKind::Var, BindingKind::Assign, pattern),
    };

    let temp = env.fresh_identifier("ref");
    let mut ctx = env.context(binding);
    ctx.lower_pattern(pattern, Expr::Ident(temp.clone()))?;
    let (lowered, temps) = ctx.finish();
    let lowered = match binding {
        BindingKind::Declare(kind) => merge_declarations(lowered, kind),
        BindingKind::Assign => lowered,
    };

    let mut introduced: Vec<Ident> = vec![temp.clone()];
    introduced.extend(temps);
    if matches!(binding, BindingKind::Declare(_)) {
        introduced.extend(idents(binding_names(pattern)));
    }
    env.register(&introduced);
    tracing::debug!(
        site = "loop-head",
        kind = kind.as_str(),
        statements = lowered.len(),
        "lowered"
    );

    Ok(Some(ForInOf {
        left: ForHead::Var(VarDecl::single(kind, Pattern::Ident(temp), None)),
        right: stmt.right.clone(),
        body: Box::new(prepend_to_body(lowered, &stmt.body)),
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInitLowering {
    /// Still a single declaration; stays in the loop header
    Inline(VarDecl),
    /// Runs before the loop
    Hoisted(Vec<Stmt>),
}

/// Lower the declaration in `for (init; test; update)`.
pub fn lower_for_init(decl: &VarDecl, env: &mut LoweringEnv<'_>) -> Result<ForInitLowering> {
    let mut stmts = lower_declaration(decl, env)?;
    if let [Stmt::Var(_)] = stmts.as_slice() {
        if let Some(Stmt::Var(decl)) = stmts.pop() {
            return Ok(ForInitLowering::Inline(decl));
        }
    }
    tracing::trace!(statements = stmts.len(), "for initializer moved before the loop");
    Ok(ForInitLowering::Hoisted(stmts))
}
