//! Integration tests for object schemas.

use gatekeep::{Schema, SchemaLike, Value};
use serde_json::json;

fn address() -> gatekeep::ObjectSchema {
    Schema::object()
        .field("street", Schema::string().non_empty())
        .field("city", Schema::string().non_empty())
        .field("zip", Schema::string().pattern(r"^\d{5}$").unwrap())
}

fn registration() -> gatekeep::ObjectSchema {
    Schema::object()
        .field("username", Schema::string().min_len(3).max_len(20))
        .field("email", Schema::email())
        .field("age", Schema::number().integer().min(13.0))
        .field("address", address())
        .optional_field("referrer", Schema::string())
        .default_field("newsletter", Schema::boolean(), false)
}

#[test]
fn test_valid_registration() {
    let input = json!({
        "username": "ada_l",
        "email": "ada@example.com",
        "age": 36,
        "address": {"street": "1 Main St", "city": "London", "zip": "12345"},
        "session": "abc"
    });

    let output = registration().parse(&input.into()).unwrap();
    let keys: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["username", "email", "age", "address", "newsletter"]);
    assert_eq!(output.get("newsletter"), Some(&Value::Bool(false)));
}

#[test]
fn test_invalid_registration_reports_everything() {
    let input = json!({
        "username": "al",
        "email": "not-an-email",
        "age": 12.5,
        "address": {"street": "", "zip": "1234"},
        "newsletter": "yes"
    });

    let errors = registration().parse(&input.into()).unwrap_err();
    let summary: Vec<(String, &str)> = errors
        .iter()
        .map(|e| (e.path.to_string(), e.code.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("username".to_string(), "min_length"),
            ("email".to_string(), "refinement"),
            ("age".to_string(), "integer"),
            ("age".to_string(), "min_value"),
            ("address.street".to_string(), "min_length"),
            ("address.city".to_string(), "invalid_type"),
            ("address.zip".to_string(), "pattern"),
            ("newsletter".to_string(), "invalid_type"),
        ]
    );
}

#[test]
fn test_null_is_not_absent() {
    let schema = Schema::object().optional_field("referrer", Schema::string());
    let errors = schema.parse(&json!({"referrer": null}).into()).unwrap_err();
    assert_eq!(errors.first().message, "Expecting type 'string'. Got type 'null'.");

    let schema = Schema::object().field("referrer", Schema::string().nullable());
    let output = schema.parse(&json!({"referrer": null}).into()).unwrap();
    assert_eq!(output.get("referrer"), Some(&Value::Null));
    assert!(schema.parse(&json!({}).into()).is_err());
}

#[test]
fn test_explicit_undefined_value_counts_as_absent() {
    let schema = Schema::object().default_field("mode", Schema::string(), "fast".to_string());
    let mut map = gatekeep::ObjectMap::new();
    map.insert("mode".to_string(), Value::Undefined);

    let output = schema.parse(&Value::Object(map)).unwrap();
    assert_eq!(output.get("mode"), Some(&Value::from("fast")));
}

#[test]
fn test_unknown_key_policies() {
    let input = json!({"id": 1, "debug": true});

    let strip = Schema::object().field("id", Schema::number());
    assert_eq!(strip.parse(&input.clone().into()).unwrap().len(), 1);

    let allow = Schema::object().field("id", Schema::number()).additional_properties(true);
    assert_eq!(allow.parse(&input.clone().into()).unwrap().len(), 2);

    let deny = Schema::object().field("id", Schema::number()).additional_properties(false);
    let errors = deny.parse(&input.clone().into()).unwrap_err();
    assert_eq!(errors.first().message, "Unexpected key 'debug'.");
    assert_eq!(errors.first().path.to_string(), "debug");

    let typed = Schema::object()
        .field("id", Schema::number())
        .additional_properties(Schema::string());
    let errors = typed.parse(&input.into()).unwrap_err();
    assert_eq!(errors.first().code, "invalid_type");
    assert_eq!(errors.first().path.to_string(), "debug");
}

#[test]
fn test_key_order_follows_declaration_then_input() {
    let schema = Schema::object()
        .field("b", Schema::number())
        .field("a", Schema::number())
        .additional_properties(true);

    let output = schema.parse(&json!({"z": 0, "a": 1, "b": 2}).into()).unwrap();
    let keys: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b", "a", "z"]);
}

#[test]
fn test_reuse_shapes_with_pick_omit_extend() {
    let user = Schema::object()
        .field("id", Schema::uuid())
        .field("name", Schema::string())
        .field("password_hash", Schema::string());

    let public = user.omit(&["password_hash"]).extend(
        Schema::object().field("avatar", Schema::optional(Schema::string())),
    );

    let input = json!({
        "id": "123e4567-e89b-12d3-a456-426614174000",
        "name": "Ann",
        "password_hash": "x"
    });
    let output = public.parse(&input.into()).unwrap();
    assert_eq!(output.len(), 2);
    assert!(!output.contains_key("password_hash"));

    let summary = Schema::object()
        .field("id", Schema::number())
        .field("title", Schema::string())
        .field("body", Schema::string())
        .pick(&["id", "title"]);
    assert!(summary.parse(&json!({"id": 1, "title": "t"}).into()).is_ok());
}

#[test]
fn test_object_output_converts_to_json() {
    let schema = Schema::object()
        .field("name", Schema::string())
        .field("tags", Schema::array(Schema::string()));
    let output = schema
        .parse(&json!({"name": "n", "tags": ["a"], "drop": 1}).into())
        .unwrap();

    let json = Value::from(output).to_json().unwrap();
    assert_eq!(json, json!({"name": "n", "tags": ["a"]}));
}
