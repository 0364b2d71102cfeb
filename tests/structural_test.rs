//! Integration tests for tuple and record schemas.

use gatekeep::{Schema, SchemaKind, SchemaLike, TupleSchema, Value, ValueValidator};
use serde_json::json;

fn coordinate() -> TupleSchema {
    Schema::tuple()
        .item(Schema::number().min(-90.0).max(90.0))
        .item(Schema::number().min(-180.0).max(180.0))
        .item(Schema::optional(Schema::string()))
}

#[test]
fn test_tuple_validates_each_position() {
    let output = coordinate().parse(&json!([51.5, -0.12, "London"]).into()).unwrap();
    assert_eq!(
        output,
        vec![Value::Number(51.5), Value::Number(-0.12), Value::from("London")]
    );
    assert_eq!(coordinate().arity(), 3);
    assert_eq!(coordinate().kind(), SchemaKind::Tuple);
}

#[test]
fn test_tuple_pads_missing_positions() {
    let output = coordinate().parse(&json!([0, 0]).into()).unwrap();
    assert_eq!(output.len(), 3);
    assert!(output[2].is_undefined());

    let errors = coordinate().parse(&json!([0]).into()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "[1]");
    assert_eq!(errors.first().message, "Expecting type 'number'. Got type 'undefined'.");
}

#[test]
fn test_tuple_drops_extra_elements() {
    let output = coordinate()
        .parse(&json!([1, 2, "x", "extra", 4]).into())
        .unwrap();
    assert_eq!(output.len(), 3);
}

#[test]
fn test_tuple_accumulates_position_errors() {
    let errors = coordinate().parse(&json!([100, "east", 3]).into()).unwrap_err();
    let summary: Vec<(String, &str)> = errors
        .iter()
        .map(|e| (e.path.to_string(), e.code.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("[0]".to_string(), "max_value"),
            ("[1]".to_string(), "invalid_type"),
            ("[2]".to_string(), "invalid_type"),
        ]
    );
}

#[test]
fn test_tuple_from_validators() {
    let schema = TupleSchema::from_validators(vec![
        Box::new(Schema::boolean()) as Box<dyn ValueValidator>,
        Box::new(Schema::literal("end").unwrap()) as Box<dyn ValueValidator>,
    ]);
    assert!(schema.parse(&json!([true, "end"]).into()).is_ok());
    assert!(schema.parse(&json!("true,end").into()).is_err());
}

#[test]
fn test_empty_tuple_accepts_any_array() {
    let schema = Schema::tuple();
    assert!(schema.parse(&json!([]).into()).unwrap().is_empty());
    assert!(schema.parse(&json!([1, 2]).into()).unwrap().is_empty());
}

#[test]
fn test_record_of_numbers() {
    let prices = Schema::record(Schema::string(), Schema::number().non_negative());

    let output = prices
        .parse(&json!({"apple": 1.25, "pear": 0, "fig": 3}).into())
        .unwrap();
    let keys: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["apple", "pear", "fig"]);
    assert_eq!(output["fig"], 3.0);
}

#[test]
fn test_record_reports_every_bad_entry() {
    let prices = Schema::record(Schema::string(), Schema::number().non_negative());
    let errors = prices
        .parse(&json!({"apple": -1, "pear": "free", "fig": 3}).into())
        .unwrap_err();

    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["apple", "pear"]);
}

#[test]
fn test_record_key_errors_precede_value_errors() {
    let schema = Schema::record(
        Schema::string().pattern("^[a-z]+$").unwrap(),
        Schema::boolean(),
    );
    let errors = schema.parse(&json!({"Flag": "on"}).into()).unwrap_err();
    let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["pattern", "invalid_type"]);
    assert!(errors.iter().all(|e| e.path.to_string() == "Flag"));
}

#[test]
fn test_record_keys_can_be_normalized() {
    let headers = Schema::record(
        Schema::string().transform(|k| k.to_ascii_lowercase()),
        Schema::string(),
    );
    let output = headers
        .parse(&json!({"Content-Type": "text/plain"}).into())
        .unwrap();
    assert_eq!(output.get("content-type").map(String::as_str), Some("text/plain"));
}

#[test]
fn test_record_normalized_keys_must_stay_unique() {
    let headers = Schema::record(
        Schema::string().transform(|k| k.to_ascii_lowercase()),
        Schema::string(),
    );
    let errors = headers
        .parse(&json!({"Accept": "a", "Host": "h", "ACCEPT": "b"}).into())
        .unwrap_err();

    let summary: Vec<(String, &str)> = errors
        .iter()
        .map(|e| (e.path.to_string(), e.code.as_str()))
        .collect();
    assert_eq!(summary, vec![("ACCEPT".to_string(), "duplicate_key")]);
}

#[test]
fn test_record_of_objects_nested_paths() {
    let teams = Schema::record(
        Schema::string(),
        Schema::array(Schema::object().field("email", Schema::email())),
    );
    let errors = teams
        .parse(&json!({"core": [{"email": "a@b.co"}, {"email": "nope"}]}).into())
        .unwrap_err();
    assert_eq!(errors.first().path.to_string(), "core[1].email");
}

#[test]
fn test_record_rejects_arrays() {
    let schema = Schema::record(Schema::string(), Schema::any()).error("expected a map");
    let errors = schema.parse(&json!([]).into()).unwrap_err();
    assert_eq!(errors.first().message, "expected a map");
    assert_eq!(errors.first().code, "invalid_type");
}
