use super::*;

#[test]
fn test_uid_generator_counts_up_per_hint() {
    let mut names = UidGenerator::new();
    assert_eq!(names.fresh_identifier("ref").name, "_ref");
    assert_eq!(names.fresh_identifier("ref").name, "_ref2");
    assert_eq!(names.fresh_identifier("ref").name, "_ref3");
    assert_eq!(names.fresh_identifier("step").name, "_step");
}

#[test]
fn test_uid_generator_skips_reserved_names() {
    let mut names = UidGenerator::with_reserved(["_ref", "_ref2", "_iterator"]);
    assert_eq!(names.fresh_identifier("ref").name, "_ref3");
    assert_eq!(names.fresh_identifier("iterator").name, "_iterator2");
    assert!(names.is_taken("_ref3"));
}

#[test]
fn test_hints_are_sanitized() {
    let mut names = UidGenerator::new();
    // a temporary's own name hints back to its base
    assert_eq!(names.fresh_identifier("_o$a").name, "_o$a");
    assert_eq!(names.fresh_identifier("_o$a2").name, "_o$a2");
    assert_eq!(names.fresh_identifier("").name, "_ref");
    assert_eq!(names.fresh_identifier("$x").name, "_x");
    assert_eq!(names.fresh_identifier("b-c").name, "_bc");
}

#[test]
fn test_helper_registry_references_and_records() {
    let mut helpers = HelperRegistry::new();
    assert_eq!(
        helpers.request_helper("extends"),
        Ok(Expr::ident("_extends"))
    );
    helpers
        .request_helper("getIterator")
        .expect("known helper");
    helpers.request_helper("extends").expect("known helper");

    let requested: Vec<&str> = helpers.requested().iter().map(String::as_str).collect();
    assert_eq!(requested, vec!["extends", "getIterator"]);
}

#[test]
fn test_helper_registry_rejects_missing_helpers() {
    let mut helpers = HelperRegistry::new().without("maybeArrayLike");
    assert_eq!(
        helpers.request_helper("maybeArrayLike"),
        Err(LoweringError::missing_helper("maybeArrayLike"))
    );

    let err = helpers
        .request_helper("slicedToArray")
        .expect_err("unknown helper");
    assert!(err.to_string().contains("slicedToArray"));
    assert!(helpers.requested().is_empty());
}

#[test]
fn test_binding_registry_keeps_first_registration_order() {
    let mut bindings = BindingRegistry::new();
    bindings.register_bindings(&[Ident::new("_ref"), Ident::new("a")]);
    bindings.register_bindings(&[Ident::new("a"), Ident::new("b")]);
    assert!(bindings.contains("b"));
    assert_eq!(bindings.into_names(), vec!["_ref", "a", "b"]);
}

#[test]
fn test_env_hands_out_contexts_sharing_names() {
    let mut names = UidGenerator::new();
    let mut helpers = HelperRegistry::new();
    let mut bindings = BindingRegistry::new();
    let config = ResolvedConfig {
        iterable_is_array: true,
        ..ResolvedConfig::default()
    };
    let mut env = LoweringEnv::new(config, &mut names, &mut helpers, &mut bindings);

    let mut first = env.context(BindingKind::Assign);
    assert!(first.config().iterable_is_array);
    assert_eq!(first.declare_temp("ref", Expr::Null).name, "_ref");
    drop(first);

    let mut second = env.context(BindingKind::Assign);
    assert_eq!(second.declare_temp("ref", Expr::Null).name, "_ref2");
    drop(second);

    env.register(&[Ident::new("_ref")]);
    drop(env);
    assert!(bindings.contains("_ref"));
}
