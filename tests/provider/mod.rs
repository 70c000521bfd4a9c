// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use anyhow::Result;
use rexcast::*;

use std::sync::Arc;

fn provider() -> RexReturnProvider {
    RexReturnProvider
}

#[test]
fn advertised_identifiers() {
    let p = provider();

    assert_eq!(p.class_like_names(), CLASS_LIKE_NAMES);
    assert_eq!(p.function_ids(), FUNCTION_IDS);
    assert_eq!(p.class_like_names().len(), 4);
    assert_eq!(p.function_ids().len(), 8);
    assert!(p.function_ids().contains(&"rex_request"));
}

#[test]
fn cast_resolves_descriptor_at_index_1() {
    // rex_type::cast($value, 'int')
    let event = MethodCallEvent::new(
        "rex_type",
        "cast",
        vec![Expr::opaque(), Expr::string("int")],
    );

    assert_eq!(
        provider().method_return_type(&event),
        Some(TypeUnion::new(Type::Int))
    );
}

#[test]
fn cast_reads_no_default() {
    // A third argument never widens the cast form.
    let event = MethodCallEvent::new(
        "rex_type",
        "cast",
        vec![Expr::opaque(), Expr::string("int"), Expr::constant("null")],
    );

    assert_eq!(
        provider().method_return_type(&event),
        Some(TypeUnion::new(Type::Int))
    );
}

#[test]
fn cast_declines_without_descriptor() {
    let event = MethodCallEvent::new("rex_type", "cast", vec![Expr::opaque()]);
    assert_eq!(provider().method_return_type(&event), None);

    let event = MethodCallEvent::new("rex_type", "cast", vec![]);
    assert_eq!(provider().method_return_type(&event), None);
}

#[test]
fn accessors_resolve_descriptor_and_default() {
    for method in ["get", "post", "request", "server", "session", "cookie", "files", "env"] {
        // rex_request::get('page', 'string', null)
        let event = MethodCallEvent::new(
            "rex_request",
            method,
            vec![
                Expr::string("page"),
                Expr::string("string"),
                Expr::constant("null"),
            ],
        );

        assert_eq!(
            provider().method_return_type(&event),
            Some(TypeUnion::new(Type::String).with_null()),
            "method {method}"
        );
    }
}

#[test]
fn accessor_without_default_does_not_widen() {
    let event = MethodCallEvent::new(
        "rex_request",
        "get",
        vec![Expr::string("page"), Expr::string("string")],
    );

    assert_eq!(
        provider().method_return_type(&event),
        Some(TypeUnion::new(Type::String))
    );
}

#[test]
fn accessor_declines_without_descriptor() {
    let event = MethodCallEvent::new("rex_request", "get", vec![Expr::string("page")]);
    assert_eq!(provider().method_return_type(&event), None);
}

#[test]
fn arraykeycast_reads_indices_2_and_3() {
    // Indices 0 and 1 hold the array and the key; both must be ignored even
    // when they look like descriptors.
    let event = MethodCallEvent::new(
        "rex_type",
        "arraykeycast",
        vec![
            Expr::string("string"),
            Expr::string("bool"),
            Expr::string("int"),
            Expr::constant("null"),
        ],
    );

    assert_eq!(
        provider().method_return_type(&event),
        Some(TypeUnion::new(Type::Int).with_null())
    );
}

#[test]
fn arraykeycast_declines_without_descriptor() {
    let event = MethodCallEvent::new(
        "rex_type",
        "arraykeycast",
        vec![Expr::opaque(), Expr::string("page")],
    );
    assert_eq!(provider().method_return_type(&event), None);
}

#[test]
fn method_names_match_case_insensitively() {
    for method in ["CAST", "Cast", "cAsT"] {
        let event = MethodCallEvent::new(
            "rex_type",
            method,
            vec![Expr::opaque(), Expr::string("bool")],
        );
        assert_eq!(
            provider().method_return_type(&event),
            Some(TypeUnion::new(Type::Bool)),
            "method {method}"
        );
    }

    let event = MethodCallEvent::new(
        "rex_type",
        "ArrayKeyCast",
        vec![
            Expr::opaque(),
            Expr::string("page"),
            Expr::string("string"),
        ],
    );
    assert_eq!(
        provider().method_return_type(&event),
        Some(TypeUnion::new(Type::String))
    );
}

#[test]
fn unknown_method_declines() {
    let event = MethodCallEvent::new(
        "rex_type",
        "fromString",
        vec![Expr::opaque(), Expr::string("int")],
    );
    assert_eq!(provider().method_return_type(&event), None);
}

#[test]
fn function_resolves_descriptor_and_default() {
    // rex_get('page', 'array[int]', null)
    let event = FunctionCallEvent::new(
        "rex_get",
        vec![
            Expr::string("page"),
            Expr::string("array[int]"),
            Expr::constant("null"),
        ],
    );

    let expected = TypeUnion::new(Type::array(
        TypeUnion::new(Type::ArrayKey),
        TypeUnion::new(Type::Int),
    ))
    .with_null();

    assert_eq!(provider().function_return_type(&event), Some(expected));
}

#[test]
fn function_declines_without_descriptor() {
    let event = FunctionCallEvent::new("rex_get", vec![Expr::string("page")]);
    assert_eq!(provider().function_return_type(&event), None);
}

#[test]
fn keyed_descriptor_at_call_site() {
    // rex_request('filter', [['name', 'string'], ['id', 'int', null]])
    let event = FunctionCallEvent::new(
        "rex_request",
        vec![
            Expr::string("filter"),
            Expr::array(vec![
                Expr::array(vec![Expr::string("name"), Expr::string("string")]),
                Expr::array(vec![
                    Expr::string("id"),
                    Expr::string("int"),
                    Expr::constant("null"),
                ]),
            ]),
        ],
    );

    let resolved = provider().function_return_type(&event).unwrap();
    assert_eq!(resolved.to_string(), "array{id: int|null, name: string}");
}

#[test]
fn global_registry_round_trip() -> Result<()> {
    providers::clear();
    assert!(providers::is_empty());

    register_builtin_providers()?;
    assert!(providers::contains("rex"));
    assert_eq!(providers::len(), 1);
    assert_eq!(providers::list_names(), vec!["rex".to_string()]);

    // Installed providers dispatch like a locally constructed one.
    let installed = providers::get("rex").unwrap();
    let event = FunctionCallEvent::new(
        "rex_env",
        vec![Expr::string("HTTP_HOST"), Expr::string("string")],
    );
    assert_eq!(
        installed.function_return_type(&event),
        Some(TypeUnion::new(Type::String))
    );

    // Re-registering the same name is rejected.
    assert!(matches!(
        register_builtin_providers(),
        Err(RegistryError::AlreadyExists { .. })
    ));

    assert!(providers::remove("rex").is_some());
    assert!(providers::is_empty());

    Ok(())
}

#[test]
fn local_registry_validates_names() {
    let registry: Registry<dyn ReturnTypeProvider> = Registry::new("TEST_REGISTRY");
    assert_eq!(registry.name(), "TEST_REGISTRY");

    assert!(matches!(
        registry.register("", Arc::new(RexReturnProvider)),
        Err(RegistryError::InvalidName { .. })
    ));
    assert!(matches!(
        registry.register("   ", Arc::new(RexReturnProvider)),
        Err(RegistryError::InvalidName { .. })
    ));

    registry
        .register("rex", Arc::new(RexReturnProvider))
        .unwrap();
    assert!(registry.contains("rex"));
    assert_eq!(registry.len(), 1);

    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.get("rex").is_none());
}
