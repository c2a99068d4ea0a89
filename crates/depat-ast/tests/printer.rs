use super::*;

fn var(kind: VarKind, name: &str, init: Expr) -> Stmt {
    Stmt::var(kind, &Ident::new(name), Some(init))
}

#[test]
fn test_numbers_print_like_source() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(-2.0), "-2");
    assert_eq!(format_number(f64::NAN), "NaN");
}

#[test]
fn test_member_access_forms() {
    let obj = Expr::ident("o");
    assert_eq!(Printer::expr_to_string(&Expr::prop(obj.clone(), "a")), "o.a");
    assert_eq!(Printer::expr_to_string(&Expr::index(obj.clone(), 2)), "o[2]");
    assert_eq!(
        Printer::expr_to_string(&Expr::member(
            obj.clone(),
            PropKey::Str {
                value: "a-b".to_string()
            }
        )),
        r#"o["a-b"]"#
    );
    assert_eq!(
        Printer::expr_to_string(&Expr::member(obj, PropKey::computed(Expr::ident("k")))),
        "o[k]"
    );
}

#[test]
fn test_conditional_default_prints_without_extra_parens() {
    let cond = Expr::conditional(
        Expr::is_undefined(Expr::ident("_o$a")),
        Expr::number(1.0),
        Expr::ident("_o$a"),
    );
    let stmt = var(VarKind::Const, "a", cond);
    assert_eq!(
        Printer::stmt_to_string(&stmt),
        "const a = _o$a === void 0 ? 1 : _o$a;"
    );
}

#[test]
fn test_sequence_is_parenthesized_inside_arguments() {
    let check = Expr::call(Expr::ident("_objectDestructuringEmpty"), vec![Expr::ident("o")]);
    let expr = Expr::call(
        Expr::ident("_extends"),
        vec![
            Expr::empty_object(),
            Expr::sequence(vec![check, Expr::ident("o")]),
        ],
    );
    assert_eq!(
        Printer::expr_to_string(&expr),
        "_extends({}, (_objectDestructuringEmpty(o), o))"
    );
}

#[test]
fn test_logical_chain_and_unary() {
    let iterator = Expr::ident("_iterator");
    let close = Expr::logical_or(
        Expr::prop(Expr::ident("_step2"), "done"),
        Expr::logical_or(
            Expr::binary(Expr::prop(iterator.clone(), "return"), "==", Expr::Null),
            Expr::method_call(iterator, "return", Vec::new()),
        ),
    );
    assert_eq!(
        Printer::stmt_to_string(&Stmt::expr(close)),
        "_step2.done || _iterator.return == null || _iterator.return();"
    );
    assert_eq!(
        Printer::expr_to_string(&Expr::not(Expr::prop(Expr::ident("_step"), "done"))),
        "!_step.done"
    );
}

#[test]
fn test_left_nested_arithmetic_keeps_grouping() {
    let sum = Expr::binary(
        Expr::ident("a"),
        "-",
        Expr::binary(Expr::ident("b"), "-", Expr::ident("c")),
    );
    assert_eq!(Printer::expr_to_string(&sum), "a - (b - c)");

    let product = Expr::binary(
        Expr::binary(Expr::ident("a"), "+", Expr::ident("b")),
        "*",
        Expr::ident("c"),
    );
    assert_eq!(Printer::expr_to_string(&product), "(a + b) * c");
}

#[test]
fn test_object_pattern_assignment_statement_gets_parens() {
    let target = Pattern::object(vec![PatternProp::shorthand("a")]);
    let stmt = Stmt::expr(Expr::assign(target, Expr::ident("o")));
    assert_eq!(Printer::stmt_to_string(&stmt), "({ a } = o);");
}

#[test]
fn test_patterns_with_holes_rest_and_defaults() {
    let pattern = Pattern::array_with_rest(
        vec![
            Some(Pattern::ident("a")),
            None,
            Some(Pattern::ident("b").with_default(Expr::number(2.0))),
        ],
        Pattern::ident("rest"),
    );
    assert_eq!(Printer::pattern_to_string(&pattern), "[a, , b = 2, ...rest]");

    let trailing_hole = Pattern::array(vec![Some(Pattern::ident("a")), None]);
    assert_eq!(Printer::pattern_to_string(&trailing_hole), "[a, ,]");

    let object = Pattern::object_with_rest(
        vec![
            PatternProp::shorthand("a"),
            PatternProp::new(PropKey::ident("b"), Pattern::ident("c")),
            PatternProp::new(
                PropKey::computed(Expr::ident("k")),
                Pattern::ident("d").with_default(Expr::Null),
            ),
        ],
        Pattern::ident("others"),
    );
    assert_eq!(
        Printer::pattern_to_string(&object),
        "{ a, b: c, [k]: d = null, ...others }"
    );
}

#[test]
fn test_rest_drain_loop_prints_inline_body() {
    let step = Ident::new("_step3");
    let iterator = Expr::ident("_iterator");
    let stmt = Stmt::For {
        init: Some(ForInit::Var(VarDecl::single(
            VarKind::Var,
            Pattern::Ident(step.clone()),
            Some(Expr::method_call(iterator.clone(), "next", Vec::new())),
        ))),
        test: Some(Expr::not(Expr::prop(Expr::Ident(step.clone()), "done"))),
        update: Some(Expr::assign_ident(
            &step,
            Expr::method_call(iterator, "next", Vec::new()),
        )),
        body: Box::new(Stmt::expr(Expr::method_call(
            Expr::ident("_rest"),
            "push",
            vec![Expr::prop(Expr::Ident(step), "value")],
        ))),
    };
    assert_eq!(
        Printer::stmt_to_string(&stmt),
        "for (var _step3 = _iterator.next(); !_step3.done; _step3 = _iterator.next()) _rest.push(_step3.value);"
    );
}

#[test]
fn test_program_blocks_are_indented() {
    let program = Program {
        body: vec![Stmt::ForOf(ForInOf {
            left: ForHead::Var(VarDecl::single(VarKind::Const, Pattern::ident("_ref"), None)),
            right: Expr::ident("xs"),
            body: Box::new(Stmt::block(vec![var(
                VarKind::Const,
                "a",
                Expr::prop(Expr::ident("_ref"), "a"),
            )])),
        })],
    };
    assert_eq!(
        Printer::print_program(&program),
        "for (const _ref of xs) {\n    const a = _ref.a;\n}\n"
    );
}

#[test]
fn test_multiple_declarators_share_one_line() {
    let stmt = Stmt::Var(VarDecl {
        kind: VarKind::Let,
        decls: vec![
            VarDeclarator {
                id: Pattern::ident("a"),
                init: Some(Expr::number(1.0)),
            },
            VarDeclarator {
                id: Pattern::ident("b"),
                init: None,
            },
        ],
    });
    assert_eq!(Printer::stmt_to_string(&stmt), "let a = 1, b;");
}

#[test]
fn test_arrow_iife_and_export_list() {
    let iife = Expr::arrow_iife(vec![Stmt::Return {
        argument: Some(Expr::number(1.0)),
    }]);
    assert_eq!(Printer::expr_to_string(&iife), "(() => {\n    return 1;\n})()");

    let export = Stmt::ExportNamed(ExportNamed {
        declaration: None,
        specifiers: vec![
            ExportSpecifier {
                local: Ident::new("a"),
                exported: Ident::new("a"),
            },
            ExportSpecifier {
                local: Ident::new("c"),
                exported: Ident::new("d"),
            },
        ],
    });
    assert_eq!(Printer::stmt_to_string(&export), "export { a, c as d };");
}

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(
        Printer::expr_to_string(&Expr::string("say \"hi\"")),
        r#""say \"hi\"""#
    );
    assert_eq!(
        Printer::expr_to_string(&Expr::array(vec![Expr::string("a"), Expr::string("b")])),
        r#"["a", "b"]"#
    );
}

#[test]
fn test_void_zero_is_parenthesized_as_member_object() {
    let read = Expr::prop(Expr::Undefined, "a");
    assert_eq!(Printer::expr_to_string(&read), "(void 0).a");
    assert_eq!(
        Printer::expr_to_string(&Expr::is_undefined(Expr::ident("x"))),
        "x === void 0"
    );
}
