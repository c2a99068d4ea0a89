//! `export` of a destructuring declaration.

use depat_ast::{ExportNamed, ExportSpecifier, Ident, Stmt, declaration_binding_names};

use super::has_pattern;

/// `export const { a, b: [c] } = o;` becomes
/// `const { a, b: [c] } = o; export { a, c };`, leaving the declaration free
/// to lower into several statements.
///
/// Returns `None` for exports that need no split.
pub fn split_export(export: &ExportNamed) -> Option<(Stmt, Stmt)> {
    let decl = export.declaration.as_ref().filter(|decl| has_pattern(decl))?;
    let specifiers = declaration_binding_names(decl)
        .into_iter()
        .map(|name| ExportSpecifier {
            local: Ident::new(name.clone()),
            exported: Ident::new(name),
        })
        .collect::<Vec<_>>();
    tracing::debug!(site = "export", names = specifiers.len(), "split");
    Some((
        Stmt::Var(decl.clone()),
        Stmt::ExportNamed(ExportNamed {
            declaration: None,
            specifiers,
        }),
    ))
}
