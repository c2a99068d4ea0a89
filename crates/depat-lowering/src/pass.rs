//! Whole-program destructuring lowering.
//!
//! [`ProgramLowerer`] walks every statement list top-down. When a statement
//! hosts a pattern, the matching adapter rewrites it and the rewrite is walked
//! again, so patterns nested inside defaults or initializers are lowered too.
//! Expressions are walked the same way; a destructuring assignment whose value
//! is used leaves temporaries that are declared with `var` right before the
//! enclosing statement.
//!
//! [`DestructuringPass`] wires the default capabilities around the walker and
//! is what the CLI runs.

use depat_ast::{
    ArrowBody, CatchClause, Expr, ExprOrSpread, ForInOf, ForInit, Function, Ident, ObjectMember,
    Pattern, Program, PropKey, Stmt, TryStmt, VarDecl, VarDeclarator, VarKind,
    collect_identifiers,
};
use depat_common::{LoweringConfig, ResolvedConfig, Result};

use crate::adapters::{
    ForInitLowering, has_pattern, lower_assignment_statement, lower_assignment_value,
    lower_catch_clause, lower_declaration, lower_for_in_of, lower_for_init, split_export,
};
use crate::capabilities::{
    BindingRegistry, HelperRegistry, KNOWN_HELPERS, LoweringEnv, UidGenerator,
};
use crate::classify::Classify;

/// Result of lowering one compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredProgram {
    pub program: Program,
    /// Helpers the output references, in first-request order
    pub helpers: Vec<String>,
    /// Bindings introduced by the lowering, in registration order
    pub bindings: Vec<String>,
}

/// Runs the lowering with the default capabilities: a name generator seeded
/// with every identifier of the program, a helper registry and a binding
/// registry.
#[derive(Debug, Clone)]
pub struct DestructuringPass {
    config: ResolvedConfig,
    helpers: HelperRegistry,
}

impl DestructuringPass {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            helpers: HelperRegistry::new(),
        }
    }

    /// Use a registry with a restricted set of helpers.
    #[must_use]
    pub fn with_helpers(mut self, helpers: HelperRegistry) -> Self {
        self.helpers = helpers;
        self
    }

    #[tracing::instrument(level = "trace", skip_all, fields(statements = program.body.len()))]
    pub fn lower_program(self, program: &Program) -> Result<LoweredProgram> {
        let mut names = UidGenerator::with_reserved(collect_identifiers(program));
        for helper in KNOWN_HELPERS {
            names.reserve(format!("_{helper}"));
        }
        let mut helpers = self.helpers;
        let mut bindings = BindingRegistry::new();

        let env = LoweringEnv::new(self.config, &mut names, &mut helpers, &mut bindings);
        let program = ProgramLowerer::new(env).lower_program(program)?;

        tracing::debug!(
            helpers = helpers.requested().len(),
            bindings = bindings.names().len(),
            "program lowered"
        );
        Ok(LoweredProgram {
            program,
            helpers: helpers.into_requested(),
            bindings: bindings.into_names(),
        })
    }
}

/// Lower `program` with options and assumptions from `config`.
pub fn lower_program(program: &Program, config: &LoweringConfig) -> Result<LoweredProgram> {
    DestructuringPass::new(config.resolve()).lower_program(program)
}

/// Tree walker applying the adapters, over caller-provided capabilities.
pub struct ProgramLowerer<'a> {
    env: LoweringEnv<'a>,
}

impl<'a> ProgramLowerer<'a> {
    pub const fn new(env: LoweringEnv<'a>) -> Self {
        Self { env }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn lower_program(&mut self, program: &Program) -> Result<Program> {
        Ok(Program {
            body: self.lower_statements(&program.body)?,
        })
    }

    pub fn lower_statements(&mut self, stmts: &[Stmt]) -> Result<Vec<Stmt>> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            self.lower_stmt(stmt, &mut out)?;
        }
        Ok(out)
    }

    /// Statement in a position that holds exactly one statement.
    fn lower_nested_stmt(&mut self, stmt: &Stmt) -> Result<Stmt> {
        let mut out = Vec::new();
        self.lower_stmt(stmt, &mut out)?;
        Ok(Stmt::from_list(out))
    }

    fn lower_stmt(&mut self, stmt: &Stmt, out: &mut Vec<Stmt>) -> Result<()> {
        let mut hoisted = Vec::new();
        let lowered = match stmt {
            Stmt::Var(decl) if has_pattern(decl) => {
                let stmts = lower_declaration(decl, &mut self.env)?;
                return self.lower_each(stmts, out);
            }
            Stmt::Var(decl) => Stmt::Var(self.lower_var_inits(decl, &mut hoisted)?),
            Stmt::Expr {
                expr:
                    Expr::Assign {
                        operator,
                        target,
                        value,
                    },
            } if operator == "=" && target.classify().is_destructuring() => {
                let stmts = lower_assignment_statement(target, value, &mut self.env)?;
                return self.lower_each(stmts, out);
            }
            Stmt::Expr { expr } => Stmt::expr(self.lower_expr(expr, &mut hoisted)?),
            Stmt::Block { body } => Stmt::block(self.lower_statements(body)?),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => Stmt::If {
                test: self.lower_expr(test, &mut hoisted)?,
                consequent: Box::new(self.lower_nested_stmt(consequent)?),
                alternate: match alternate {
                    Some(alternate) => Some(Box::new(self.lower_nested_stmt(alternate)?)),
                    None => None,
                },
            },
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                let (init, prelude) = match init {
                    Some(ForInit::Var(decl)) if has_pattern(decl) => {
                        match lower_for_init(decl, &mut self.env)? {
                            ForInitLowering::Inline(decl) => (
                                Some(ForInit::Var(self.lower_var_inits(&decl, &mut hoisted)?)),
                                None,
                            ),
                            ForInitLowering::Hoisted(stmts) => {
                                let mut prelude = Vec::new();
                                for stmt in &stmts {
                                    self.lower_stmt(stmt, &mut prelude)?;
                                }
                                (None, Some(prelude))
                            }
                        }
                    }
                    Some(ForInit::Var(decl)) => (
                        Some(ForInit::Var(self.lower_var_inits(decl, &mut hoisted)?)),
                        None,
                    ),
                    Some(ForInit::Expr { expr }) => (
                        Some(ForInit::Expr {
                            expr: self.lower_expr(expr, &mut hoisted)?,
                        }),
                        None,
                    ),
                    None => (None, None),
                };
                let lowered = Stmt::For {
                    init,
                    test: self.lower_opt_expr(test.as_ref(), &mut hoisted)?,
                    update: self.lower_opt_expr(update.as_ref(), &mut hoisted)?,
                    body: Box::new(self.lower_nested_stmt(body)?),
                };
                match prelude {
                    Some(mut prelude) => {
                        push_hoisted(&mut prelude, hoisted);
                        prelude.push(lowered);
                        out.push(Stmt::block(prelude));
                        return Ok(());
                    }
                    None => lowered,
                }
            }
            Stmt::ForIn(for_in_of) => Stmt::ForIn(self.lower_for_in_of(for_in_of, &mut hoisted)?),
            Stmt::ForOf(for_in_of) => Stmt::ForOf(self.lower_for_in_of(for_in_of, &mut hoisted)?),
            Stmt::While { test, body } => Stmt::While {
                test: self.lower_expr(test, &mut hoisted)?,
                body: Box::new(self.lower_nested_stmt(body)?),
            },
            Stmt::Try(try_stmt) => Stmt::Try(self.lower_try(try_stmt)?),
            Stmt::Return { argument } => Stmt::Return {
                argument: self.lower_opt_expr(argument.as_ref(), &mut hoisted)?,
            },
            Stmt::Throw { argument } => Stmt::Throw {
                argument: self.lower_expr(argument, &mut hoisted)?,
            },
            Stmt::Function(function) => Stmt::Function(self.lower_function(function)?),
            Stmt::ExportNamed(export) => {
                if let Some((decl, list)) = split_export(export) {
                    self.lower_stmt(&decl, out)?;
                    out.push(list);
                    return Ok(());
                }
                let mut export = export.clone();
                if let Some(decl) = &export.declaration {
                    export.declaration = Some(self.lower_var_inits(decl, &mut hoisted)?);
                }
                Stmt::ExportNamed(export)
            }
            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty => stmt.clone(),
        };
        push_hoisted(out, hoisted);
        out.push(lowered);
        Ok(())
    }

    /// Walk adapter output again.
    fn lower_each(&mut self, stmts: Vec<Stmt>, out: &mut Vec<Stmt>) -> Result<()> {
        for stmt in &stmts {
            self.lower_stmt(stmt, out)?;
        }
        Ok(())
    }

    /// A declaration without patterns; only its initializers need walking.
    fn lower_var_inits(&mut self, decl: &VarDecl, hoisted: &mut Vec<Ident>) -> Result<VarDecl> {
        let decls = decl
            .decls
            .iter()
            .map(|declarator| {
                Ok(VarDeclarator {
                    id: declarator.id.clone(),
                    init: self.lower_opt_expr(declarator.init.as_ref(), hoisted)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(VarDecl {
            kind: decl.kind,
            decls,
        })
    }

    fn lower_for_in_of(&mut self, stmt: &ForInOf, hoisted: &mut Vec<Ident>) -> Result<ForInOf> {
        let rewritten = lower_for_in_of(stmt, &mut self.env)?;
        let stmt = rewritten.as_ref().unwrap_or(stmt);
        Ok(ForInOf {
            left: stmt.left.clone(),
            right: self.lower_expr(&stmt.right, hoisted)?,
            body: Box::new(self.lower_nested_stmt(&stmt.body)?),
        })
    }

    fn lower_try(&mut self, try_stmt: &TryStmt) -> Result<TryStmt> {
        let handler = match &try_stmt.handler {
            Some(clause) => {
                let rewritten = lower_catch_clause(clause, &mut self.env)?;
                let clause = rewritten.as_ref().unwrap_or(clause);
                Some(CatchClause {
                    param: clause.param.clone(),
                    body: self.lower_statements(&clause.body)?,
                })
            }
            None => None,
        };
        let finalizer = match &try_stmt.finalizer {
            Some(finalizer) => Some(self.lower_statements(finalizer)?),
            None => None,
        };
        Ok(TryStmt {
            block: self.lower_statements(&try_stmt.block)?,
            handler,
            finalizer,
        })
    }

    fn lower_function(&mut self, function: &Function) -> Result<Function> {
        Ok(Function {
            name: function.name.clone(),
            params: function.params.clone(),
            body: self.lower_statements(&function.body)?,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn lower_opt_expr(
        &mut self,
        expr: Option<&Expr>,
        hoisted: &mut Vec<Ident>,
    ) -> Result<Option<Expr>> {
        expr.map(|expr| self.lower_expr(expr, hoisted)).transpose()
    }

    fn lower_boxed(&mut self, expr: &Expr, hoisted: &mut Vec<Ident>) -> Result<Box<Expr>> {
        self.lower_expr(expr, hoisted).map(Box::new)
    }

    fn lower_expr(&mut self, expr: &Expr, hoisted: &mut Vec<Ident>) -> Result<Expr> {
        let lowered = match expr {
            Expr::Assign {
                operator,
                target,
                value,
            } if operator == "=" && target.classify().is_destructuring() => {
                let lowered = lower_assignment_value(target, value, &mut self.env)?;
                hoisted.extend(lowered.hoisted);
                return self.lower_expr(&lowered.expr, hoisted);
            }
            Expr::Ident(_)
            | Expr::Null
            | Expr::Bool { .. }
            | Expr::Num { .. }
            | Expr::Str { .. }
            | Expr::Undefined
            | Expr::This => expr.clone(),
            Expr::Array { elements } => Expr::Array {
                elements: elements
                    .iter()
                    .map(|element| {
                        element
                            .as_ref()
                            .map(|element| self.lower_spread(element, hoisted))
                            .transpose()
                    })
                    .collect::<Result<_>>()?,
            },
            Expr::Object { props } => Expr::Object {
                props: props
                    .iter()
                    .map(|prop| match prop {
                        ObjectMember::KeyValue { key, value } => Ok(ObjectMember::KeyValue {
                            key: self.lower_key(key, hoisted)?,
                            value: self.lower_expr(value, hoisted)?,
                        }),
                        ObjectMember::Spread { expr } => Ok(ObjectMember::Spread {
                            expr: self.lower_expr(expr, hoisted)?,
                        }),
                    })
                    .collect::<Result<_>>()?,
            },
            Expr::Member { object, property } => Expr::Member {
                object: self.lower_boxed(object, hoisted)?,
                property: self.lower_key(property, hoisted)?,
            },
            Expr::Call { callee, args } => Expr::Call {
                callee: self.lower_boxed(callee, hoisted)?,
                args: args
                    .iter()
                    .map(|arg| self.lower_spread(arg, hoisted))
                    .collect::<Result<_>>()?,
            },
            Expr::Assign {
                operator,
                target,
                value,
            } => Expr::Assign {
                operator: operator.clone(),
                target: Box::new(self.lower_target(target, hoisted)?),
                value: self.lower_boxed(value, hoisted)?,
            },
            Expr::Sequence { exprs } => Expr::Sequence {
                exprs: exprs
                    .iter()
                    .map(|expr| self.lower_expr(expr, hoisted))
                    .collect::<Result<_>>()?,
            },
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => Expr::Conditional {
                test: self.lower_boxed(test, hoisted)?,
                consequent: self.lower_boxed(consequent, hoisted)?,
                alternate: self.lower_boxed(alternate, hoisted)?,
            },
            Expr::Binary {
                operator,
                left,
                right,
            } => Expr::Binary {
                operator: operator.clone(),
                left: self.lower_boxed(left, hoisted)?,
                right: self.lower_boxed(right, hoisted)?,
            },
            Expr::Logical {
                operator,
                left,
                right,
            } => Expr::Logical {
                operator: operator.clone(),
                left: self.lower_boxed(left, hoisted)?,
                right: self.lower_boxed(right, hoisted)?,
            },
            Expr::Unary { operator, argument } => Expr::Unary {
                operator: operator.clone(),
                argument: self.lower_boxed(argument, hoisted)?,
            },
            Expr::Function(function) => Expr::Function(self.lower_function(function)?),
            Expr::Arrow { params, body } => Expr::Arrow {
                params: params.clone(),
                body: self.lower_arrow_body(body)?,
            },
        };
        Ok(lowered)
    }

    /// Temporaries of a concise body belong to the arrow, which then needs a
    /// block body to declare them.
    fn lower_arrow_body(&mut self, body: &ArrowBody) -> Result<ArrowBody> {
        match body {
            ArrowBody::Expr { expr } => {
                let mut hoisted = Vec::new();
                let expr = self.lower_expr(expr, &mut hoisted)?;
                if hoisted.is_empty() {
                    return Ok(ArrowBody::Expr {
                        expr: Box::new(expr),
                    });
                }
                let mut body = Vec::with_capacity(2);
                push_hoisted(&mut body, hoisted);
                body.push(Stmt::Return {
                    argument: Some(expr),
                });
                Ok(ArrowBody::Block { body })
            }
            ArrowBody::Block { body } => Ok(ArrowBody::Block {
                body: self.lower_statements(body)?,
            }),
        }
    }

    fn lower_spread(
        &mut self,
        element: &ExprOrSpread,
        hoisted: &mut Vec<Ident>,
    ) -> Result<ExprOrSpread> {
        Ok(ExprOrSpread {
            spread: element.spread,
            expr: self.lower_expr(&element.expr, hoisted)?,
        })
    }

    fn lower_key(&mut self, key: &PropKey, hoisted: &mut Vec<Ident>) -> Result<PropKey> {
        match key {
            PropKey::Computed { expr } => Ok(PropKey::Computed {
                expr: self.lower_boxed(expr, hoisted)?,
            }),
            other => Ok(other.clone()),
        }
    }

    /// Leaf assignment target; only member expressions contain expressions.
    fn lower_target(&mut self, target: &Pattern, hoisted: &mut Vec<Ident>) -> Result<Pattern> {
        match target {
            Pattern::Expr { expr } => Ok(Pattern::Expr {
                expr: self.lower_boxed(expr, hoisted)?,
            }),
            other => Ok(other.clone()),
        }
    }
}

/// `var _ref, _ref2;` ahead of the statement that assigns them.
fn push_hoisted(out: &mut Vec<Stmt>, hoisted: Vec<Ident>) {
    if hoisted.is_empty() {
        return;
    }
    out.push(Stmt::Var(VarDecl {
        kind: VarKind::Var,
        decls: hoisted
            .into_iter()
            .map(|name| VarDeclarator {
                id: Pattern::Ident(name),
                init: None,
            })
            .collect(),
    }));
}

#[cfg(test)]
#[path = "../tests/pass.rs"]
mod tests;
