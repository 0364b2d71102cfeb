//! Integration tests for modifiers: nullable, optional, defaults, refine,
//! transform, try_map and chain, including cross-field rules on objects.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gatekeep::validation::{failure, success};
use gatekeep::{JsonPath, ObjectMap, Presence, Schema, SchemaError, SchemaKind, SchemaLike, Value};
use serde_json::json;

fn number_of(map: &ObjectMap, key: &str) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[test]
fn test_nullable_and_optional_are_distinct() {
    let nullable = Schema::nullable(Schema::number());
    assert_eq!(nullable.parse(&Value::Null).unwrap(), None);
    assert_eq!(nullable.parse(&json!(2).into()).unwrap(), Some(2.0));
    assert!(nullable.parse(&Value::Undefined).is_err());

    let optional = Schema::optional(Schema::number());
    assert_eq!(optional.parse(&Value::Undefined).unwrap(), Presence::Absent);
    assert_eq!(optional.parse(&json!(2).into()).unwrap(), Presence::Present(2.0));
    assert!(optional.parse(&Value::Null).is_err());
}

#[test]
fn test_nullable_optional_output_values() {
    let schema = Schema::number().nullable().optional();
    assert_eq!(Value::from(schema.parse(&Value::Null).unwrap()), Value::Null);
    assert_eq!(Value::from(schema.parse(&Value::Undefined).unwrap()), Value::Undefined);
}

#[test]
fn test_defaults() {
    let schema = Schema::defaulted(Schema::string().min_len(2), "en".to_string());
    assert_eq!(schema.parse(&Value::Undefined).unwrap(), "en");
    assert_eq!(schema.parse(&json!("fr").into()).unwrap(), "fr");

    // A present but invalid value never falls back
    assert!(schema.parse(&json!("x").into()).is_err());
    assert!(schema.parse(&Value::Null).is_err());
}

#[test]
fn test_default_fn_runs_for_each_absent_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema = Schema::defaulted_with(Schema::number(), move || {
        counter.fetch_add(1, Ordering::SeqCst) as f64
    });

    assert_eq!(schema.parse(&Value::Undefined).unwrap(), 0.0);
    assert_eq!(schema.parse(&Value::Undefined).unwrap(), 1.0);
    assert_eq!(schema.parse(&json!(9).into()).unwrap(), 9.0);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_refine_runs_only_after_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let schema = Schema::refine(
        Schema::number(),
        move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            *n != 13.0
        },
        "unlucky",
    );

    assert!(schema.parse(&json!("13").into()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let errors = schema.parse(&json!(13).into()).unwrap_err();
    assert_eq!(errors.first().message, "unlucky");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_refine_custom_code() {
    let schema = Schema::string()
        .refine(|s| s.starts_with("sk_"), "must be a secret key")
        .code("secret_key");
    let errors = schema.parse(&json!("pk_1").into()).unwrap_err();
    assert_eq!(errors.first().code, "secret_key");
}

#[test]
fn test_transform_changes_type() {
    let schema = Schema::transform(Schema::string(), |s| s.split(',').count());
    assert_eq!(schema.parse(&json!("a,b,c").into()).unwrap(), 3);
    assert_eq!(schema.kind(), SchemaKind::String);
}

#[test]
fn test_try_map_errors_are_relative() {
    let version = Schema::try_map(Schema::string(), |s| {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts.iter().all(|p| p.parse::<u32>().is_ok()) {
            success(s)
        } else {
            failure(
                SchemaError::new(JsonPath::root(), "expected MAJOR.MINOR.PATCH")
                    .with_code("semver"),
            )
        }
    });
    let schema = Schema::object().field("version", version);

    assert!(schema.parse(&json!({"version": "1.2.3"}).into()).is_ok());
    let errors = schema.parse(&json!({"version": "1.2"}).into()).unwrap_err();
    assert_eq!(errors.first().path.to_string(), "version");
    assert_eq!(errors.first().code, "semver");
}

#[test]
fn test_chain_runs_steps_in_order() {
    let schema = Schema::chain(Schema::string(), |s| s.trim().to_string())
        .then(|s| format!("<{}>", s));
    assert_eq!(schema.parse(&json!("  a ").into()).unwrap(), "<a>");
}

#[test]
fn test_cross_field_total_check() {
    let order = Schema::object()
        .field("quantity", Schema::number().integer().positive())
        .field("unit_price", Schema::number().non_negative())
        .field("total", Schema::number().non_negative())
        .try_map(|order| {
            let expected = number_of(&order, "quantity") * number_of(&order, "unit_price");
            if number_of(&order, "total") == expected {
                success(order)
            } else {
                failure(
                    SchemaError::new(
                        JsonPath::from_field("total"),
                        "total must equal quantity * unit_price",
                    )
                    .with_code("invalid_total"),
                )
            }
        });

    assert!(order
        .parse(&json!({"quantity": 5, "unit_price": 10, "total": 50}).into())
        .is_ok());

    let errors = order
        .parse(&json!({"quantity": 5, "unit_price": 10, "total": 30}).into())
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "invalid_total");
    assert_eq!(errors.first().path.to_string(), "total");
}

#[test]
fn test_cross_field_check_nested_in_array() {
    let range = Schema::object()
        .field("start", Schema::number())
        .field("end", Schema::number())
        .try_map(|range| {
            if number_of(&range, "start") <= number_of(&range, "end") {
                success(range)
            } else {
                failure(
                    SchemaError::new(JsonPath::from_field("end"), "end must not precede start")
                        .with_code("date_range"),
                )
            }
        });
    let schema = Schema::array(range);

    let errors = schema
        .parse(&json!([{"start": 1, "end": 2}, {"start": 5, "end": 3}]).into())
        .unwrap_err();
    assert_eq!(errors.first().path.to_string(), "[1].end");
}

#[test]
fn test_cross_field_rule_skipped_when_fields_invalid() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let passwords = Schema::object()
        .field("password", Schema::string().min_len(8))
        .field("confirm", Schema::string())
        .refine(
            move |form| {
                counter.fetch_add(1, Ordering::SeqCst);
                form.get("password") == form.get("confirm")
            },
            "passwords do not match",
        );

    let errors = passwords
        .parse(&json!({"password": "short", "confirm": "short"}).into())
        .unwrap_err();
    assert_eq!(errors.first().code, "min_length");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let errors = passwords
        .parse(&json!({"password": "long enough", "confirm": "long enougH"}).into())
        .unwrap_err();
    assert_eq!(errors.first().message, "passwords do not match");
    assert!(errors.first().path.is_root());
}

#[test]
fn test_parse_or_panic_returns_output() {
    let schema = Schema::string().chain(|s| s.to_uppercase());
    assert_eq!(schema.parse_or_panic(&json!("ok").into()), "OK");
}

#[test]
#[should_panic(expected = "Validation failed with 1 error(s)")]
fn test_parse_or_panic_panics_with_errors() {
    Schema::string().parse_or_panic(&Value::Null);
}
