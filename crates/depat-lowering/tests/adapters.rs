use super::*;
use crate::capabilities::{BindingRegistry, HelperRegistry, LoweringEnv, UidGenerator};
use depat_ast::{
    CatchClause, ExportNamed, Expr, ForHead, ForInOf, Pattern, PatternProp, Printer, PropKey,
    VarDeclarator,
};
use depat_common::ResolvedConfig;

struct Fixture {
    names: UidGenerator,
    helpers: HelperRegistry,
    bindings: BindingRegistry,
}

impl Fixture {
    fn new() -> Self {
        Self {
            names: UidGenerator::new(),
            helpers: HelperRegistry::new(),
            bindings: BindingRegistry::new(),
        }
    }

    fn env(&mut self) -> LoweringEnv<'_> {
        LoweringEnv::new(
            ResolvedConfig::default(),
            &mut self.names,
            &mut self.helpers,
            &mut self.bindings,
        )
    }

    fn bindings(&self) -> Vec<&str> {
        self.bindings.names().iter().map(String::as_str).collect()
    }
}

fn object(names: &[&str]) -> Pattern {
    Pattern::object(names.iter().map(|name| PatternProp::shorthand(*name)).collect())
}

fn array(names: &[&str]) -> Pattern {
    Pattern::array(names.iter().map(|name| Some(Pattern::ident(*name))).collect())
}

fn declarator(id: Pattern, init: Option<Expr>) -> VarDeclarator {
    VarDeclarator { id, init }
}

#[test]
fn test_declaration_merges_into_one_statement() {
    let decl = VarDecl {
        kind: VarKind::Const,
        decls: vec![
            declarator(object(&["a", "b"]), Some(Expr::ident("o"))),
            declarator(Pattern::ident("c"), Some(Expr::number(1.0))),
        ],
    };
    assert!(has_pattern(&decl));

    let mut fixture = Fixture::new();
    let stmts = lower_declaration(&decl, &mut fixture.env()).expect("lowering should succeed");
    assert_eq!(
        Printer::statements_to_string(&stmts),
        "const a = o.a, b = o.b, c = 1;"
    );
    assert_eq!(fixture.bindings(), vec!["a", "b"]);
}

#[test]
fn test_declaration_keeps_iterator_close_after_bindings() {
    let decl = VarDecl::single(VarKind::Let, array(&["a"]), Some(Expr::ident("xs")));
    let mut fixture = Fixture::new();
    let stmts = lower_declaration(&decl, &mut fixture.env()).expect("lowering should succeed");
    assert_eq!(
        Printer::statements_to_string(&stmts),
        "let _iterator = _getIterator(xs), _step = _iterator.next(), _done = _step.done, a = _done ? void 0 : _step.value;\n\
         _done || _iterator.return == null || _iterator.return();"
    );
    assert_eq!(fixture.bindings(), vec!["_iterator", "_step", "_done", "a"]);
}

#[test]
fn test_declaration_without_initializer_reads_undefined() {
    let decl = VarDecl::single(VarKind::Var, object(&["a"]), None);
    let mut fixture = Fixture::new();
    let stmts = lower_declaration(&decl, &mut fixture.env()).expect("lowering should succeed");
    assert_eq!(Printer::statements_to_string(&stmts), "var a = (void 0).a;");
}

#[test]
fn test_plain_declaration_has_no_pattern() {
    let decl = VarDecl::single(VarKind::Let, Pattern::ident("a"), Some(Expr::number(1.0)));
    assert!(!has_pattern(&decl));
}

#[test]
fn test_assignment_statement_is_flat() {
    let mut fixture = Fixture::new();
    let stmts = lower_assignment_statement(&object(&["a", "b"]), &Expr::ident("o"), &mut fixture.env())
        .expect("lowering should succeed");
    assert_eq!(Printer::statements_to_string(&stmts), "a = o.a;\nb = o.b;");
    assert!(fixture.bindings().is_empty());
}

#[test]
fn test_assignment_value_ends_with_the_source() {
    let mut fixture = Fixture::new();
    let source = Expr::array(vec![Expr::ident("b"), Expr::ident("a")]);
    let lowered = lower_assignment_value(&array(&["a", "b"]), &source, &mut fixture.env())
        .expect("lowering should succeed");
    assert_eq!(
        Printer::expr_to_string(&lowered.expr),
        "_ref = [b, a], a = _ref[0], b = _ref[1], _ref"
    );
    assert_eq!(lowered.hoisted, vec![Ident::new("_ref")]);
    assert_eq!(fixture.bindings(), vec!["_ref"]);
}

#[test]
fn test_assignment_value_wraps_rest_loop() {
    let mut fixture = Fixture::new();
    let pattern = Pattern::array_with_rest(vec![Some(Pattern::ident("a"))], Pattern::ident("r"));
    let lowered = lower_assignment_value(&pattern, &Expr::ident("xs"), &mut fixture.env())
        .expect("lowering should succeed");
    let printed = Printer::expr_to_string(&lowered.expr);
    assert!(printed.starts_with("_ref = xs, _iterator = _getIterator(_ref), "));
    assert!(printed.contains("(() => {\n    if (!_done) for (var _step2 = "));
    assert!(printed.ends_with("r = _rest, _ref"));
    let hoisted: Vec<&str> = lowered.hoisted.iter().map(|name| name.name.as_str()).collect();
    assert_eq!(hoisted, vec!["_ref", "_iterator", "_step", "_done", "_rest"]);
}

#[test]
fn test_for_of_declaration_destructures_in_body() {
    let stmt = ForInOf {
        left: ForHead::Var(VarDecl::single(VarKind::Const, array(&["k", "v"]), None)),
        right: Expr::ident("entries"),
        body: Box::new(Stmt::expr(Expr::call(
            Expr::ident("use"),
            vec![Expr::ident("k"), Expr::ident("v")],
        ))),
    };
    let mut fixture = Fixture::new();
    let lowered = lower_for_in_of(&stmt, &mut fixture.env())
        .expect("lowering should succeed")
        .expect("head destructures");
    assert_eq!(
        Printer::stmt_to_string(&Stmt::ForOf(lowered)),
        "for (const _ref of entries) {\n    \
         const _iterator = _getIterator(_ref), _step = _iterator.next(), _done = _step.done, k = _done ? void 0 : _step.value, _step2 = _done ? _step : _iterator.next(), _done2 = _done || _step2.done, v = _done2 ? void 0 : _step2.value;\n    \
         _done2 || _iterator.return == null || _iterator.return();\n    \
         use(k, v);\n}"
    );
    assert_eq!(fixture.bindings(), vec!["_ref", "_iterator", "_step", "_done", "_step2", "_done2", "k", "v"]);
}

#[test]
fn test_for_in_pattern_head_assigns() {
    let stmt = ForInOf {
        left: ForHead::Pattern {
            pattern: object(&["a"]),
        },
        right: Expr::ident("xs"),
        body: Box::new(Stmt::expr(Expr::call(Expr::ident("f"), Vec::new()))),
    };
    let mut fixture = Fixture::new();
    let lowered = lower_for_in_of(&stmt, &mut fixture.env())
        .expect("lowering should succeed")
        .expect("head destructures");
    assert_eq!(
        Printer::stmt_to_string(&Stmt::ForIn(lowered)),
        "for (var _ref in xs) {\n    a = _ref.a;\n    f();\n}"
    );
    // assigned names already exist
    assert_eq!(fixture.bindings(), vec!["_ref"]);
}

#[test]
fn test_plain_loop_head_is_untouched() {
    let stmt = ForInOf {
        left: ForHead::Var(VarDecl::single(VarKind::Let, Pattern::ident("x"), None)),
        right: Expr::ident("xs"),
        body: Box::new(Stmt::Empty),
    };
    let mut fixture = Fixture::new();
    assert_eq!(lower_for_in_of(&stmt, &mut fixture.env()), Ok(None));
}

#[test]
fn test_catch_parameter_becomes_temporary() {
    let clause = CatchClause {
        param: Some(object(&["message"])),
        body: vec![Stmt::expr(Expr::call(
            Expr::ident("log"),
            vec![Expr::ident("message")],
        ))],
    };
    let mut fixture = Fixture::new();
    let lowered = lower_catch_clause(&clause, &mut fixture.env())
        .expect("lowering should succeed")
        .expect("parameter destructures");
    assert_eq!(lowered.param, Some(Pattern::ident("_ref")));
    assert_eq!(
        Printer::statements_to_string(&lowered.body),
        "let message = _ref.message;\nlog(message);"
    );
    assert_eq!(fixture.bindings(), vec!["_ref", "message"]);

    let plain = CatchClause {
        param: Some(Pattern::ident("err")),
        body: Vec::new(),
    };
    assert_eq!(lower_catch_clause(&plain, &mut fixture.env()), Ok(None));
}

#[test]
fn test_export_is_split_from_its_declaration() {
    let pattern = Pattern::object(vec![
        PatternProp::shorthand("a"),
        PatternProp::new(PropKey::ident("b"), array(&["c"])),
    ]);
    let export = ExportNamed {
        declaration: Some(VarDecl::single(VarKind::Const, pattern, Some(Expr::ident("o")))),
        specifiers: Vec::new(),
    };
    let (decl, list) = split_export(&export).expect("export declares a pattern");
    assert!(matches!(decl, Stmt::Var(_)));
    assert_eq!(Printer::stmt_to_string(&list), "export { a, c };");

    let plain = ExportNamed {
        declaration: Some(VarDecl::single(VarKind::Const, Pattern::ident("x"), None)),
        specifiers: Vec::new(),
    };
    assert!(split_export(&plain).is_none());
}

#[test]
fn test_for_init_inline_or_hoisted() {
    let mut fixture = Fixture::new();
    let inline = VarDecl::single(VarKind::Let, object(&["a"]), Some(Expr::ident("o")));
    let ForInitLowering::Inline(decl) =
        lower_for_init(&inline, &mut fixture.env()).expect("lowering should succeed")
    else {
        panic!("single declaration stays in the header");
    };
    assert_eq!(Printer::stmt_to_string(&Stmt::Var(decl)), "let a = o.a;");

    let hoisted = VarDecl::single(VarKind::Let, array(&["b"]), Some(Expr::ident("xs")));
    let lowered = lower_for_init(&hoisted, &mut fixture.env()).expect("lowering should succeed");
    assert!(matches!(lowered, ForInitLowering::Hoisted(ref stmts) if stmts.len() == 2));
}

#[test]
fn test_merge_stops_at_other_statements() {
    let var = |name: &str, value: f64| Stmt::var(VarKind::Var, &Ident::new(name), Some(Expr::number(value)));
    let stmts = vec![
        var("a", 1.0),
        Stmt::expr(Expr::call(Expr::ident("f"), Vec::new())),
        var("b", 2.0),
        var("c", 3.0),
    ];
    assert_eq!(
        Printer::statements_to_string(&merge_declarations(stmts, VarKind::Let)),
        "let a = 1;\nf();\nlet b = 2, c = 3;"
    );
}

#[test]
fn test_empty_pattern_declaration_checks_the_initializer() {
    let decl = VarDecl::single(
        VarKind::Const,
        Pattern::object(Vec::new()),
        Some(Expr::call(Expr::ident("f"), Vec::new())),
    );
    let mut fixture = Fixture::new();
    let stmts = lower_declaration(&decl, &mut fixture.env()).expect("lowering should succeed");
    assert_eq!(Printer::statements_to_string(&stmts), "_objectDestructuringEmpty(f());");
    assert!(fixture.bindings().is_empty());
}
