//! `catch (pattern)` parameters.

use depat_ast::{CatchClause, Expr, Ident, Pattern, VarKind, binding_names};
use depat_common::Result;

use super::idents;
use crate::capabilities::LoweringEnv;
use crate::classify::Classify;
use crate::transformer::BindingKind;

/// `catch ({ message }) { … }` becomes
/// `catch (_ref) { let message = _ref.message; … }`.
///
/// Returns `None` when the clause has no destructuring parameter.
pub fn lower_catch_clause(
    clause: &CatchClause,
    env: &mut LoweringEnv<'_>,
) -> Result<Option<CatchClause>> {
    let Some(pattern) = clause.param.as_ref().filter(|param| param.classify().is_destructuring())
    else {
        return Ok(None);
    };

    let temp = env.fresh_identifier("ref");
    let mut ctx = env.context(BindingKind::Declare(VarKind::Let));
    ctx.lower_pattern(pattern, Expr::Ident(temp.clone()))?;
    let (mut body, temps) = ctx.finish();

    let mut introduced: Vec<Ident> = vec![temp.clone()];
    introduced.extend(temps);
    introduced.extend(idents(binding_names(pattern)));
    env.register(&introduced);
    tracing::debug!(site = "catch", statements = body.len(), "lowered");

    body.extend(clause.body.iter().cloned());
    Ok(Some(CatchClause {
        param: Some(Pattern::Ident(temp)),
        body,
    }))
}
