//! Integration tests: guarded methods validated through the JSON Schema bridge.
//!
//! Each test wires a real `JsonSchemaBridge` (email-format `BodyDto`) into
//! an `Interceptor` and calls a wrapped closure, checking both the
//! violations reported and whether the closure ran.

use std::cell::Cell;
use std::sync::Arc;

use paramguard_core::{resolve_path, MethodId, SchemaId, ValidationBridge};
use paramguard_intercept::{
    DeclaredType, GuardedMethod, Interceptor, MethodSignature, ParamRegistry,
};
use paramguard_schema::{JsonSchemaBridge, SchemaStore, ValidatorOptions};
use serde_json::{json, Value};

fn bridge() -> Arc<JsonSchemaBridge> {
    let store = SchemaStore::new().with_schema(
        "BodyDto",
        json!({
            "type": "object",
            "properties": {"name": {"type": "string", "format": "email"}}
        }),
    );
    Arc::new(JsonSchemaBridge::new(store).unwrap())
}

fn interceptor(signature: MethodSignature) -> Interceptor<JsonSchemaBridge> {
    let registry = Arc::new(ParamRegistry::new().with(signature));
    Interceptor::checked(registry, bridge()).unwrap()
}

// ---------------------------------------------------------------------------
// Path resolution and the bridge on their own
// ---------------------------------------------------------------------------

#[test]
fn nested_property_selected() {
    let data = json!({"body": {"item": {"name": "Danny"}}});
    assert_eq!(resolve_path(&data, Some("body.item.name")), Some(&json!("Danny")));
    assert_eq!(resolve_path(&json!({}), Some("body.item.name")), None);
}

#[test]
fn bridge_reports_invalid_email() {
    let violations = bridge().validate(
        &SchemaId::from("BodyDto"),
        &json!({"name": "sds"}),
        &ValidatorOptions::default(),
    );
    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.target, Some(json!({"name": "sds"})));
    assert_eq!(v.property, "name");
    assert_eq!(v.constraint("isEmail"), Some("name must be an email"));
}

#[test]
fn bridge_accepts_valid_email() {
    let violations = bridge().validate(
        &SchemaId::from("BodyDto"),
        &json!({"name": "sds@dasdas.com"}),
        &ValidatorOptions::default(),
    );
    assert!(violations.is_empty());
}

// ---------------------------------------------------------------------------
// Raw argument validated against its declared type
// ---------------------------------------------------------------------------

#[test]
fn declared_type_invalid_argument_fails() {
    let guarded = interceptor(
        MethodSignature::new("TestClass::method").validated(DeclaredType::schema("BodyDto")),
    )
    .wrap("TestClass::method", |_: &[Value]| 123);

    let err = guarded.call(&[json!({"name": "asdas"})]).unwrap_err();
    assert_eq!(err.to_string(), "Validation Error");
    assert_eq!(err.validation_errors().len(), 1);
    assert_eq!(
        err.validation_errors()[0].constraint("isEmail"),
        Some("name must be an email")
    );
}

#[test]
fn declared_type_valid_argument_returns_result() {
    let guarded = interceptor(
        MethodSignature::new("TestClass::method").validated(DeclaredType::schema("BodyDto")),
    )
    .wrap("TestClass::method", |args: &[Value]| args[0]["name"].clone());

    let result = guarded.call(&[json!({"name": "asdas@gmail.com"})]).unwrap();
    assert_eq!(result, json!("asdas@gmail.com"));
}

#[test]
fn declared_object_type_rejects_array_argument() {
    let ran = Cell::new(false);
    let guarded = interceptor(
        MethodSignature::new("TestClass::method").validated(DeclaredType::schema("BodyDto")),
    )
    .wrap("TestClass::method", |_: &[Value]| ran.set(true));

    let err = guarded.call(&[json!([{"name": "bad"}, 42])]).unwrap_err();
    assert!(!ran.get());
    assert_eq!(err.validation_errors().len(), 1);
    assert!(err.validation_errors()[0].has_constraint("isObject"));
}

// ---------------------------------------------------------------------------
// Override: nested path plus explicit schema
// ---------------------------------------------------------------------------

#[test]
fn override_missing_path_fails_with_is_defined() {
    let ran = Cell::new(false);
    let guarded = interceptor(
        MethodSignature::new("TestClass::method").validated_at(
            DeclaredType::Untyped,
            "body",
            "BodyDto",
        ),
    )
    .wrap("TestClass::method", |_: &[Value]| ran.set(true));

    let err = guarded.call(&[json!({"name": "asdas"})]).unwrap_err();
    assert!(!ran.get());
    assert_eq!(err.to_string(), "Validation Error");
    assert_eq!(err.validation_errors().len(), 1);
    assert_eq!(
        err.validation_errors()[0].constraint("isDefined"),
        Some("property body is missing")
    );

    let err = guarded.call(&[json!({})]).unwrap_err();
    assert!(err.validation_errors()[0].has_constraint("isDefined"));
}

#[test]
fn override_valid_nested_value_returns_result() {
    let guarded = interceptor(
        MethodSignature::new("TestClass::method").validated_at(
            DeclaredType::Untyped,
            "body",
            "BodyDto",
        ),
    )
    .wrap("TestClass::method", |_: &[Value]| 123);

    let args = [json!({"body": {"name": "asdas@gmail.com"}})];
    assert_eq!(guarded.call(&args).unwrap(), 123);
}

#[test]
fn override_invalid_nested_value_fails() {
    let guarded = interceptor(
        MethodSignature::new("TestClass::method")
            .validated_at(DeclaredType::Untyped, "req.body", "BodyDto"),
    )
    .wrap("TestClass::method", |_: &[Value]| 123);

    let err = guarded
        .call(&[json!({"req": {"body": {"name": "nope"}}})])
        .unwrap_err();
    assert_eq!(err.validation_errors().len(), 1);
    assert!(err.validation_errors()[0].has_constraint("isEmail"));
}

#[test]
fn missing_path_wins_over_other_positions() {
    let guarded = interceptor(
        MethodSignature::new("m")
            .validated(DeclaredType::schema("BodyDto"))
            .validated(DeclaredType::schema("BodyDto"))
            .validated_at(DeclaredType::Untyped, "body", "BodyDto"),
    )
    .wrap("m", |_: &[Value]| ());

    let err = guarded
        .call(&[json!({"name": "bad"}), json!({"name": "worse"}), json!({})])
        .unwrap_err();
    assert_eq!(err.validation_errors().len(), 1);
    assert!(err.validation_errors()[0].has_constraint("isDefined"));
}

// ---------------------------------------------------------------------------
// Array declared types
// ---------------------------------------------------------------------------

fn array_method() -> GuardedMethod<JsonSchemaBridge, impl Fn(&[Value]) -> i32> {
    interceptor(
        MethodSignature::new("TestClass::method")
            .validated_at(DeclaredType::array_of("BodyDto"), "", "BodyDto"),
    )
    .wrap("TestClass::method", |_: &[Value]| 123)
}

#[test]
fn array_of_valid_elements_returns_result() {
    let args = [json!([{"name": "asdas@gmail.com"}])];
    assert_eq!(array_method().call(&args).unwrap(), 123);
}

#[test]
fn array_with_invalid_element_fails() {
    let err = array_method()
        .call(&[json!([{"name": "asdasm"}])])
        .unwrap_err();
    assert_eq!(err.validation_errors().len(), 1);
    assert!(err.validation_errors()[0].has_constraint("isEmail"));
}

#[test]
fn array_reports_every_invalid_element() {
    let err = array_method()
        .call(&[json!([{"name": "one"}, {"name": "ok@x.com"}, {"name": "three"}])])
        .unwrap_err();
    let values: Vec<&Value> = err
        .validation_errors()
        .iter()
        .filter_map(|v| v.value.as_ref())
        .collect();
    assert_eq!(values, vec![&json!("one"), &json!("three")]);
}

#[test]
fn array_declared_but_object_given_fails_with_is_array() {
    let err = array_method()
        .call(&[json!({"name": "asdas@gmail.com"})])
        .unwrap_err();
    assert_eq!(err.to_string(), "Validation Error");
    assert_eq!(err.validation_errors().len(), 1);
    assert_eq!(
        err.validation_errors()[0].constraint("isArray"),
        Some("input param must be array")
    );
}

// ---------------------------------------------------------------------------
// Identity and concurrency
// ---------------------------------------------------------------------------

#[test]
fn unflagged_method_behaves_like_unwrapped() {
    let plain = |args: &[Value]| args.iter().filter(|a| a.is_object()).count();
    let guarded = interceptor(MethodSignature::new("m").param(DeclaredType::schema("BodyDto")))
        .wrap("m", plain);

    for args in [vec![], vec![json!({"name": "x"})], vec![json!(1), json!({})]] {
        assert_eq!(guarded.call(args.as_slice()).unwrap(), plain(args.as_slice()));
    }
}

#[test]
fn guarded_method_shared_across_threads() {
    let guarded = Arc::new(
        interceptor(MethodSignature::new("m").validated(DeclaredType::schema("BodyDto")))
            .wrap("m", |_: &[Value]| true),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let guarded = Arc::clone(&guarded);
            std::thread::spawn(move || {
                let name = if i % 2 == 0 { format!("u{i}@x.com") } else { format!("u{i}") };
                guarded.call(&[json!({ "name": name })]).is_ok()
            })
        })
        .collect();

    let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outcomes, vec![true, false, true, false]);
}

#[test]
fn options_forwarded_to_bridge() {
    let registry = Arc::new(
        ParamRegistry::new()
            .with(MethodSignature::new("m").validated(DeclaredType::schema("BodyDto"))),
    );
    let interceptor = Interceptor::checked(registry, bridge())
        .unwrap()
        .with_options(ValidatorOptions {
            whitelist: true,
            forbid_non_whitelisted: true,
            ..ValidatorOptions::default()
        });

    let err = interceptor
        .check(&MethodId::from("m"), &[json!({"name": "a@b.co", "admin": true})])
        .unwrap_err();
    assert!(err.validation_errors()[0].has_constraint("whitelistValidation"));
}
