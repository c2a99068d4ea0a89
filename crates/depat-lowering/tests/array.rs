use super::*;
use crate::capabilities::{HelperRegistry, UidGenerator};
use crate::transformer::BindingKind;
use depat_ast::Printer;
use depat_common::ResolvedConfig;

fn lower_with(config: ResolvedConfig, kind: BindingKind, pattern: &Pattern, source: Expr) -> (String, Vec<String>) {
    let mut names = UidGenerator::new();
    let mut helpers = HelperRegistry::new();
    let stmts = LoweringContext::new(kind, config, &mut names, &mut helpers)
        .lower(pattern, source)
        .expect("lowering should succeed");
    (Printer::statements_to_string(&stmts), helpers.into_requested())
}

fn lower(pattern: &Pattern, source: Expr) -> String {
    lower_with(
        ResolvedConfig::default(),
        BindingKind::Declare(VarKind::Const),
        pattern,
        source,
    )
    .0
}

fn loose() -> ResolvedConfig {
    ResolvedConfig {
        iterable_is_array: true,
        ..ResolvedConfig::default()
    }
}

fn idents(names: &[&str]) -> Pattern {
    Pattern::array(names.iter().map(|name| Some(Pattern::ident(*name))).collect())
}

fn array_pattern(pattern: Pattern) -> ArrayPattern {
    let Pattern::Array(array) = pattern else {
        panic!("expected an array pattern");
    };
    array
}

fn literal(exprs: Vec<Expr>) -> Vec<Option<ExprOrSpread>> {
    exprs.into_iter().map(|expr| Some(ExprOrSpread::plain(expr))).collect()
}

fn call(name: &str) -> Expr {
    Expr::call(Expr::ident(name), Vec::new())
}

#[test]
fn test_iterator_steps_once_per_position_and_closes() {
    let (output, helpers) = lower_with(
        ResolvedConfig::default(),
        BindingKind::Declare(VarKind::Const),
        &idents(&["a", "b"]),
        Expr::ident("xs"),
    );
    assert_eq!(
        output,
        "var _iterator = _getIterator(xs);\n\
         var _step = _iterator.next();\n\
         var _done = _step.done;\n\
         const a = _done ? void 0 : _step.value;\n\
         var _step2 = _done ? _step : _iterator.next();\n\
         var _done2 = _done || _step2.done;\n\
         const b = _done2 ? void 0 : _step2.value;\n\
         _done2 || _iterator.return == null || _iterator.return();"
    );
    assert_eq!(helpers, vec!["getIterator"]);
}

#[test]
fn test_holes_still_advance_the_iterator() {
    let pattern = Pattern::array(vec![Some(Pattern::ident("a")), None, Some(Pattern::ident("b"))]);
    assert_eq!(
        lower(&pattern, Expr::ident("xs")),
        "var _iterator = _getIterator(xs);\n\
         var _step = _iterator.next();\n\
         var _done = _step.done;\n\
         const a = _done ? void 0 : _step.value;\n\
         var _step2 = _done ? _step : _iterator.next();\n\
         var _done2 = _done || _step2.done;\n\
         var _step3 = _done2 ? _step2 : _iterator.next();\n\
         var _done3 = _done2 || _step3.done;\n\
         const b = _done3 ? void 0 : _step3.value;\n\
         _done3 || _iterator.return == null || _iterator.return();"
    );
}

#[test]
fn test_rest_drains_the_iterator() {
    let pattern = Pattern::array_with_rest(vec![Some(Pattern::ident("a"))], Pattern::ident("rest"));
    assert_eq!(
        lower(&pattern, Expr::ident("xs")),
        "var _iterator = _getIterator(xs);\n\
         var _step = _iterator.next();\n\
         var _done = _step.done;\n\
         const a = _done ? void 0 : _step.value;\n\
         var _rest = [];\n\
         if (!_done) for (var _step2 = _iterator.next(); !_step2.done; _step2 = _iterator.next()) _rest.push(_step2.value);\n\
         const rest = _rest;"
    );
}

#[test]
fn test_each_step_result_reads_done_once() {
    let pattern = Pattern::array_with_rest(
        vec![Some(Pattern::ident("a")), None, Some(Pattern::ident("b"))],
        Pattern::ident("rest"),
    );
    let output = lower(&pattern, Expr::ident("xs"));
    assert_eq!(output.matches("_step.done").count(), 1);
    assert_eq!(output.matches("_step2.done").count(), 1);
    assert_eq!(output.matches("_step3.done").count(), 1);
    // the drain only starts when nothing reported `done` yet
    assert!(output.contains("if (!_done3) for (var _step4 = _iterator.next(); !_step4.done;"));

    let closed = lower(&idents(&["a", "b"]), Expr::ident("xs"));
    assert_eq!(closed.matches(".done").count(), 2);
    assert!(closed.ends_with("_done2 || _iterator.return == null || _iterator.return();"));
}

#[test]
fn test_rest_only_drains_without_guard() {
    let pattern = Pattern::array_with_rest(Vec::new(), Pattern::ident("rest"));
    assert_eq!(
        lower(&pattern, Expr::ident("xs")),
        "var _iterator = _getIterator(xs);\n\
         var _rest = [];\n\
         for (var _step = _iterator.next(); !_step.done; _step = _iterator.next()) _rest.push(_step.value);\n\
         const rest = _rest;"
    );
}

#[test]
fn test_element_default_checks_step_value() {
    let pattern = Pattern::array(vec![Some(Pattern::ident("a").with_default(Expr::number(1.0)))]);
    assert_eq!(
        lower(&pattern, Expr::ident("xs")),
        "var _iterator = _getIterator(xs);\n\
         var _step = _iterator.next();\n\
         var _done = _step.done;\n\
         var _step$value = _done ? void 0 : _step.value;\n\
         const a = _step$value === void 0 ? 1 : _step$value;\n\
         _done || _iterator.return == null || _iterator.return();"
    );
}

#[test]
fn test_empty_pattern_opens_and_closes() {
    assert_eq!(
        lower(&Pattern::array(Vec::new()), Expr::ident("xs")),
        "var _iterator = _getIterator(xs);\n_iterator.return == null || _iterator.return();"
    );
}

#[test]
fn test_call_source_is_captured_before_iterating() {
    let output = lower(&idents(&["a"]), call("f"));
    assert!(output.starts_with("var _f = f();\nvar _iterator = _getIterator(_f);\n"));
    assert_eq!(output.matches("f()").count(), 1);
}

#[test]
fn test_iterable_is_array_uses_indices_and_slice() {
    let pattern = Pattern::array_with_rest(
        vec![Some(Pattern::ident("a")), None, Some(Pattern::ident("b"))],
        Pattern::ident("rest"),
    );
    let (output, helpers) = lower_with(
        loose(),
        BindingKind::Declare(VarKind::Const),
        &pattern,
        Expr::ident("xs"),
    );
    assert_eq!(
        output,
        "const a = xs[0];\nconst b = xs[2];\nconst rest = xs.slice(3);"
    );
    assert!(helpers.is_empty());
}

#[test]
fn test_index_reads_capture_only_when_read_twice() {
    let kind = BindingKind::Declare(VarKind::Const);
    assert_eq!(
        lower_with(loose(), kind, &idents(&["a"]), call("f")).0,
        "const a = f()[0];"
    );
    assert_eq!(
        lower_with(loose(), kind, &idents(&["a", "b"]), call("f")).0,
        "var _f = f();\nconst a = _f[0];\nconst b = _f[1];"
    );
    // no consumer still evaluates the source
    assert_eq!(
        lower_with(loose(), kind, &Pattern::array(vec![None]), call("f")).0,
        "var _f = f();"
    );
}

#[test]
fn test_arguments_rest_uses_prototype_slice() {
    let pattern = Pattern::array_with_rest(vec![Some(Pattern::ident("a"))], Pattern::ident("rest"));
    assert_eq!(
        lower(&pattern, Expr::ident("arguments")),
        "const a = arguments[0];\nconst rest = Array.prototype.slice.call(arguments, 1);"
    );
}

#[test]
fn test_matching_literal_is_unpacked() {
    let source = Expr::array(vec![Expr::number(1.0), Expr::number(2.0)]);
    assert_eq!(
        lower(&idents(&["a", "b"]), source),
        "const a = 1;\nconst b = 2;"
    );

    let pattern = Pattern::array_with_rest(vec![Some(Pattern::ident("a"))], Pattern::ident("rest"));
    let source = Expr::array(vec![Expr::number(1.0), Expr::number(2.0), Expr::number(3.0)]);
    assert_eq!(lower(&pattern, source), "const a = 1;\nconst rest = [2, 3];");

    let pattern = Pattern::array(vec![Some(Pattern::ident("a").with_default(Expr::number(5.0)))]);
    let source = Expr::Array {
        elements: vec![None],
    };
    assert_eq!(lower(&pattern, source), "const a = 5;");
}

#[test]
fn test_swap_reads_both_before_writing() {
    let source = Expr::array(vec![Expr::ident("b"), Expr::ident("a")]);
    let (output, helpers) = lower_with(
        ResolvedConfig::default(),
        BindingKind::Assign,
        &idents(&["a", "b"]),
        source,
    );
    assert_eq!(output, "var _ref = [b, a];\na = _ref[0];\nb = _ref[1];");
    assert!(helpers.is_empty());
}

#[test]
fn test_literal_that_assigns_a_bound_name_is_not_unpacked() {
    // [a, b] = [1, (a = 5, 2)] leaves a === 1
    let writes_a = Expr::sequence(vec![
        Expr::assign(Pattern::ident("a"), Expr::number(5.0)),
        Expr::number(2.0),
    ]);
    let values = literal(vec![Expr::number(1.0), writes_a.clone()]);
    assert!(!can_unpack(&array_pattern(idents(&["a", "b"])), &values));

    let (output, _) = lower_with(
        ResolvedConfig::default(),
        BindingKind::Assign,
        &idents(&["a", "b"]),
        Expr::array(vec![Expr::number(1.0), writes_a]),
    );
    assert!(output.starts_with("var _ref = [1, "));
    assert!(output.ends_with("a = _ref[0];\nb = _ref[1];"));
}

#[test]
fn test_built_ins_call_symbol_iterator() {
    let config = ResolvedConfig {
        use_built_ins: true,
        ..ResolvedConfig::default()
    };
    let (output, helpers) = lower_with(
        config,
        BindingKind::Declare(VarKind::Let),
        &idents(&["a"]),
        Expr::ident("xs"),
    );
    assert!(output.starts_with("var _iterator = xs[Symbol.iterator]();\n"));
    assert!(helpers.is_empty());
}

#[test]
fn test_array_like_goes_through_maybe_array_like() {
    let config = ResolvedConfig {
        array_like_is_iterable: true,
        use_built_ins: true,
        ..ResolvedConfig::default()
    };
    let (output, helpers) = lower_with(
        config,
        BindingKind::Declare(VarKind::Let),
        &idents(&["a"]),
        Expr::ident("xs"),
    );
    assert!(output.starts_with("var _iterator = _maybeArrayLike(_getIterator, xs);\n"));
    assert_eq!(helpers, vec!["getIterator", "maybeArrayLike"]);
}

#[test]
fn test_can_unpack_rules() {
    let ab = array_pattern(idents(&["a", "b"]));
    assert!(can_unpack(&ab, &literal(vec![Expr::number(1.0), Expr::ident("c")])));
    // element count must match without a rest
    assert!(!can_unpack(&ab, &literal(vec![Expr::number(1.0)])));
    assert!(!can_unpack(
        &ab,
        &literal(vec![Expr::number(1.0), Expr::number(2.0), Expr::number(3.0)])
    ));
    // calls and member reads may observe earlier writes
    assert!(!can_unpack(&ab, &literal(vec![call("f"), Expr::number(2.0)])));
    assert!(!can_unpack(
        &ab,
        &literal(vec![Expr::prop(Expr::ident("o"), "x"), Expr::number(2.0)])
    ));
    // a value reading a bound name
    assert!(!can_unpack(&ab, &literal(vec![Expr::ident("b"), Expr::ident("a")])));

    let spread = vec![
        Some(ExprOrSpread::plain(Expr::number(1.0))),
        Some(ExprOrSpread::spread(Expr::ident("ys"))),
    ];
    assert!(!can_unpack(&ab, &spread));

    let holey = array_pattern(Pattern::array(vec![Some(Pattern::ident("a")), None]));
    assert!(!can_unpack(&holey, &literal(vec![Expr::number(1.0), Expr::number(2.0)])));

    let with_rest = array_pattern(Pattern::array_with_rest(
        vec![Some(Pattern::ident("a"))],
        Pattern::ident("r"),
    ));
    assert!(can_unpack(&with_rest, &literal(vec![Expr::number(1.0), Expr::number(2.0)])));
    assert!(!can_unpack(&with_rest, &literal(vec![Expr::number(1.0), Expr::ident("r")])));
}

#[test]
fn test_strategy_names() {
    assert_eq!(ArrayStrategy::Index.as_str(), "index");
    assert_eq!(ArrayStrategy::Iterator.as_str(), "iterator");
}
