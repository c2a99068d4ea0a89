//! Printer for the syntax tree.
//!
//! Produces JavaScript text with fixed formatting: four-space indentation,
//! one statement per line, all declarators of a declaration on one line.
//! Parentheses are inserted from operator precedence, so the tree never needs
//! explicit parenthesis nodes.

use crate::ast::*;

// Binding power of each expression form, loosest first.
const SEQUENCE: u8 = 0;
const ASSIGN: u8 = 1;
const CONDITIONAL: u8 = 2;
const LOGICAL_OR: u8 = 3;
const LOGICAL_AND: u8 = 4;
const BIT_OR: u8 = 5;
const BIT_XOR: u8 = 6;
const BIT_AND: u8 = 7;
const EQUALITY: u8 = 8;
const RELATIONAL: u8 = 9;
const SHIFT: u8 = 10;
const ADDITIVE: u8 = 11;
const MULTIPLICATIVE: u8 = 12;
const EXPONENT: u8 = 13;
const UNARY: u8 = 14;
const CALL: u8 = 17;
const PRIMARY: u8 = 18;

fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "||" | "??" => LOGICAL_OR,
        "&&" => LOGICAL_AND,
        "|" => BIT_OR,
        "^" => BIT_XOR,
        "&" => BIT_AND,
        "==" | "!=" | "===" | "!==" => EQUALITY,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => RELATIONAL,
        "<<" | ">>" | ">>>" => SHIFT,
        "+" | "-" => ADDITIVE,
        "*" | "/" | "%" => MULTIPLICATIVE,
        "**" => EXPONENT,
        _ => EQUALITY,
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Sequence { .. } => SEQUENCE,
        Expr::Assign { .. } | Expr::Arrow { .. } => ASSIGN,
        Expr::Conditional { .. } => CONDITIONAL,
        Expr::Binary { operator, .. } | Expr::Logical { operator, .. } => {
            binary_precedence(operator)
        }
        // `void 0` and `-1` print as unary expressions
        Expr::Unary { .. } | Expr::Undefined => UNARY,
        Expr::Num { value } if value.is_sign_negative() && *value != 0.0 => UNARY,
        Expr::Member { .. } | Expr::Call { .. } => CALL,
        _ => PRIMARY,
    }
}

/// Format a number the way JavaScript source spells it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

pub struct Printer {
    output: String,
    indent_level: u32,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Print a whole program, one top-level statement per line.
    pub fn print_program(program: &Program) -> String {
        let mut printer = Self::new();
        printer.emit_statements(&program.body);
        printer.output
    }

    /// Print statements without a trailing newline.
    pub fn statements_to_string(stmts: &[Stmt]) -> String {
        let mut printer = Self::new();
        printer.emit_statements(stmts);
        let mut output = printer.output;
        while output.ends_with('\n') {
            output.pop();
        }
        output
    }

    pub fn stmt_to_string(stmt: &Stmt) -> String {
        let mut printer = Self::new();
        printer.emit_stmt(stmt);
        printer.output
    }

    pub fn expr_to_string(expr: &Expr) -> String {
        let mut printer = Self::new();
        printer.emit_expr(expr, SEQUENCE);
        printer.output
    }

    pub fn pattern_to_string(pattern: &Pattern) -> String {
        let mut printer = Self::new();
        printer.emit_pattern(pattern);
        printer.output
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str("    ");
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Each statement on its own indented line.
    pub fn emit_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.write_indent();
            self.emit_stmt(stmt);
            self.write_line();
        }
    }

    fn emit_block(&mut self, body: &[Stmt]) {
        if body.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statements(body);
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr { expr } => {
                if starts_statement_ambiguously(expr) {
                    self.write("(");
                    self.emit_expr(expr, SEQUENCE);
                    self.write(")");
                } else {
                    self.emit_expr(expr, SEQUENCE);
                }
                self.write(";");
            }
            Stmt::Var(decl) => {
                self.emit_var_decl(decl);
                self.write(";");
            }
            Stmt::Block { body } => self.emit_block(body),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.write("if (");
                self.emit_expr(test, SEQUENCE);
                self.write(") ");
                self.emit_stmt(consequent);
                if let Some(alternate) = alternate {
                    self.write(" else ");
                    self.emit_stmt(alternate);
                }
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                self.write("for (");
                match init {
                    Some(ForInit::Var(decl)) => self.emit_var_decl(decl),
                    Some(ForInit::Expr { expr }) => self.emit_expr(expr, SEQUENCE),
                    None => {}
                }
                self.write(";");
                if let Some(test) = test {
                    self.write(" ");
                    self.emit_expr(test, SEQUENCE);
                }
                self.write(";");
                if let Some(update) = update {
                    self.write(" ");
                    self.emit_expr(update, SEQUENCE);
                }
                self.write(") ");
                self.emit_stmt(body);
            }
            Stmt::ForIn(for_in_of) => self.emit_for_in_of(for_in_of, "in"),
            Stmt::ForOf(for_in_of) => self.emit_for_in_of(for_in_of, "of"),
            Stmt::While { test, body } => {
                self.write("while (");
                self.emit_expr(test, SEQUENCE);
                self.write(") ");
                self.emit_stmt(body);
            }
            Stmt::Try(try_stmt) => {
                self.write("try ");
                self.emit_block(&try_stmt.block);
                if let Some(handler) = &try_stmt.handler {
                    self.write(" catch ");
                    if let Some(param) = &handler.param {
                        self.write("(");
                        self.emit_pattern(param);
                        self.write(") ");
                    }
                    self.emit_block(&handler.body);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.write(" finally ");
                    self.emit_block(finalizer);
                }
            }
            Stmt::Return { argument } => {
                self.write("return");
                if let Some(argument) = argument {
                    self.write(" ");
                    self.emit_expr(argument, SEQUENCE);
                }
                self.write(";");
            }
            Stmt::Throw { argument } => {
                self.write("throw ");
                self.emit_expr(argument, SEQUENCE);
                self.write(";");
            }
            Stmt::Break { label } => self.emit_jump("break", label.as_ref()),
            Stmt::Continue { label } => self.emit_jump("continue", label.as_ref()),
            Stmt::Function(function) => self.emit_function(function),
            Stmt::ExportNamed(export) => {
                self.write("export ");
                if let Some(decl) = &export.declaration {
                    self.emit_var_decl(decl);
                    self.write(";");
                    return;
                }
                if export.specifiers.is_empty() {
                    self.write("{};");
                    return;
                }
                self.write("{ ");
                for (i, specifier) in export.specifiers.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&specifier.local.name);
                    if specifier.exported.name != specifier.local.name {
                        self.write(" as ");
                        self.write(&specifier.exported.name);
                    }
                }
                self.write(" };");
            }
            Stmt::Empty => self.write(";"),
        }
    }

    fn emit_jump(&mut self, keyword: &str, label: Option<&Ident>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(&label.name);
        }
        self.write(";");
    }

    fn emit_var_decl(&mut self, decl: &VarDecl) {
        self.write(decl.kind.as_str());
        self.write(" ");
        for (i, declarator) in decl.decls.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_pattern(&declarator.id);
            if let Some(init) = &declarator.init {
                self.write(" = ");
                self.emit_expr(init, ASSIGN);
            }
        }
    }

    fn emit_for_in_of(&mut self, for_in_of: &ForInOf, keyword: &str) {
        self.write("for (");
        match &for_in_of.left {
            ForHead::Var(decl) => self.emit_var_decl(decl),
            ForHead::Pattern { pattern } => self.emit_pattern(pattern),
        }
        self.write(" ");
        self.write(keyword);
        self.write(" ");
        self.emit_expr(&for_in_of.right, ASSIGN);
        self.write(") ");
        self.emit_stmt(&for_in_of.body);
    }

    fn emit_function(&mut self, function: &Function) {
        self.write("function");
        if let Some(name) = &function.name {
            self.write(" ");
            self.write(&name.name);
        }
        self.emit_params(&function.params);
        self.write(" ");
        self.emit_block(&function.body);
    }

    fn emit_params(&mut self, params: &[Pattern]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_pattern(param);
        }
        self.write(")");
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    pub fn emit_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(ident) => self.write(&ident.name),
            Pattern::Array(array) => {
                self.write("[");
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.emit_pattern(element);
                    }
                }
                if let Some(rest) = &array.rest {
                    if !array.elements.is_empty() {
                        self.write(", ");
                    }
                    self.write("...");
                    self.emit_pattern(&rest.target);
                } else if matches!(array.elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Pattern::Object(object) => {
                if object.properties.is_empty() && object.rest.is_none() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, prop) in object.properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if is_shorthand(prop) {
                        self.emit_pattern(&prop.value);
                    } else {
                        self.emit_prop_key(&prop.key);
                        self.write(": ");
                        self.emit_pattern(&prop.value);
                    }
                }
                if let Some(rest) = &object.rest {
                    if !object.properties.is_empty() {
                        self.write(", ");
                    }
                    self.write("...");
                    self.emit_pattern(&rest.target);
                }
                self.write(" }");
            }
            Pattern::Assign(assign) => {
                self.emit_pattern(&assign.target);
                self.write(" = ");
                self.emit_expr(&assign.default_value, ASSIGN);
            }
            Pattern::Expr { expr } => self.emit_expr(expr, CALL),
        }
    }

    fn emit_prop_key(&mut self, key: &PropKey) {
        match key {
            PropKey::Ident { name } => self.write(name),
            PropKey::Str { value } => self.write(&quote(value)),
            PropKey::Num { value } => self.write(&format_number(*value)),
            PropKey::Computed { expr } => {
                self.write("[");
                self.emit_expr(expr, ASSIGN);
                self.write("]");
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Emit `expr`, parenthesized when it binds looser than `min_precedence`.
    pub fn emit_expr(&mut self, expr: &Expr, min_precedence: u8) {
        if precedence(expr) < min_precedence {
            self.write("(");
            self.emit_expr_inner(expr);
            self.write(")");
        } else {
            self.emit_expr_inner(expr);
        }
    }

    fn emit_expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.write(&ident.name),
            Expr::Null => self.write("null"),
            Expr::Bool { value } => self.write(if *value { "true" } else { "false" }),
            Expr::Num { value } => self.write(&format_number(*value)),
            Expr::Str { value } => self.write(&quote(value)),
            Expr::Undefined => self.write("void 0"),
            Expr::This => self.write("this"),
            Expr::Array { elements } => {
                self.write("[");
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(element) = element {
                        self.emit_expr_or_spread(element);
                    }
                }
                if matches!(elements.last(), Some(None)) {
                    self.write(",");
                }
                self.write("]");
            }
            Expr::Object { props } => {
                if props.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match prop {
                        ObjectMember::KeyValue { key, value } => {
                            self.emit_prop_key(key);
                            self.write(": ");
                            self.emit_expr(value, ASSIGN);
                        }
                        ObjectMember::Spread { expr } => {
                            self.write("...");
                            self.emit_expr(expr, ASSIGN);
                        }
                    }
                }
                self.write(" }");
            }
            Expr::Member { object, property } => {
                self.emit_expr(object, CALL);
                match property {
                    PropKey::Ident { name } => {
                        self.write(".");
                        self.write(name);
                    }
                    PropKey::Str { value } => {
                        self.write("[");
                        self.write(&quote(value));
                        self.write("]");
                    }
                    PropKey::Num { value } => {
                        self.write("[");
                        self.write(&format_number(*value));
                        self.write("]");
                    }
                    PropKey::Computed { expr } => {
                        self.write("[");
                        self.emit_expr(expr, SEQUENCE);
                        self.write("]");
                    }
                }
            }
            Expr::Call { callee, args } => {
                self.emit_expr(callee, CALL);
                self.write("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr_or_spread(arg);
                }
                self.write(")");
            }
            Expr::Assign {
                operator,
                target,
                value,
            } => {
                self.emit_pattern(target);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_expr(value, ASSIGN);
            }
            Expr::Sequence { exprs } => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(expr, ASSIGN);
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.emit_expr(test, LOGICAL_OR);
                self.write(" ? ");
                self.emit_expr(consequent, ASSIGN);
                self.write(" : ");
                self.emit_expr(alternate, ASSIGN);
            }
            Expr::Binary {
                operator,
                left,
                right,
            }
            | Expr::Logical {
                operator,
                left,
                right,
            } => {
                let level = binary_precedence(operator);
                self.emit_expr(left, level);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                // `a || (b || c)` prints flat: the operator is associative
                let right_level = match &**right {
                    Expr::Logical {
                        operator: inner, ..
                    } if matches!(expr, Expr::Logical { .. }) && inner == operator => level,
                    _ => level + 1,
                };
                self.emit_expr(right, right_level);
            }
            Expr::Unary { operator, argument } => {
                self.write(operator);
                if operator.chars().all(|c| c.is_ascii_alphabetic()) {
                    self.write(" ");
                }
                self.emit_expr(argument, UNARY);
            }
            Expr::Function(function) => self.emit_function(function),
            Expr::Arrow { params, body } => {
                self.emit_params(params);
                self.write(" => ");
                match body {
                    ArrowBody::Expr { expr } => {
                        if matches!(**expr, Expr::Object { .. }) {
                            self.write("(");
                            self.emit_expr(expr, SEQUENCE);
                            self.write(")");
                        } else {
                            self.emit_expr(expr, ASSIGN);
                        }
                    }
                    ArrowBody::Block { body } => self.emit_block(body),
                }
            }
        }
    }

    fn emit_expr_or_spread(&mut self, element: &ExprOrSpread) {
        if element.spread {
            self.write("...");
        }
        self.emit_expr(&element.expr, ASSIGN);
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_shorthand(prop: &PatternProp) -> bool {
    let PropKey::Ident { name } = &prop.key else {
        return false;
    };
    match &prop.value {
        Pattern::Ident(ident) => ident.name == *name,
        Pattern::Assign(assign) => {
            matches!(&*assign.target, Pattern::Ident(ident) if ident.name == *name)
        }
        _ => false,
    }
}

/// An expression statement must not begin with `{` or `function`.
fn starts_statement_ambiguously(expr: &Expr) -> bool {
    match expr {
        Expr::Object { .. } | Expr::Function(_) => true,
        Expr::Assign { target, .. } => match &**target {
            Pattern::Object(_) => true,
            Pattern::Expr { expr } => precedence(expr) >= CALL && starts_statement_ambiguously(expr),
            _ => false,
        },
        Expr::Member { object, .. } => {
            precedence(object) >= CALL && starts_statement_ambiguously(object)
        }
        Expr::Call { callee, .. } => {
            precedence(callee) >= CALL && starts_statement_ambiguously(callee)
        }
        Expr::Binary {
            operator, left, ..
        }
        | Expr::Logical {
            operator, left, ..
        } => {
            precedence(left) >= binary_precedence(operator) && starts_statement_ambiguously(left)
        }
        Expr::Conditional { test, .. } => {
            precedence(test) >= LOGICAL_OR && starts_statement_ambiguously(test)
        }
        Expr::Sequence { exprs } => exprs
            .first()
            .is_some_and(|first| precedence(first) >= ASSIGN && starts_statement_ambiguously(first)),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/printer.rs"]
mod tests;
