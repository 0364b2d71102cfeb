//! Tests for sharing built schemas across threads.

use std::sync::Arc;
use std::thread;

use gatekeep::{ObjectSchema, Schema, SchemaLike, Value, ValueValidator};
use serde_json::json;

fn user_schema() -> ObjectSchema {
    Schema::object()
        .field("name", Schema::string().min_len(1))
        .field("age", Schema::number().integer().positive())
        .optional_field("tags", Schema::array(Schema::string()))
}

#[test]
fn test_concurrent_validation() {
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let output = schema
                    .parse(&json!({"name": format!("User{}", i), "age": 20 + i}).into())
                    .unwrap();
                assert_eq!(output.get("age"), Some(&Value::Number(f64::from(20 + i))));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                // Every other thread sends an invalid age
                let age = if i % 2 == 0 { json!(-1) } else { json!(30) };
                let result = schema.parse(&json!({"name": "x", "age": age}).into());
                (i, result.is_ok())
            })
        })
        .collect();

    for handle in handles {
        let (i, ok) = handle.join().unwrap();
        assert_eq!(ok, i % 2 == 1);
    }
}

#[test]
fn test_arc_schema_is_itself_a_schema() {
    let shared = Arc::new(Schema::string().min_len(2));
    let object = Schema::object()
        .field("first", Arc::clone(&shared))
        .field("last", Arc::clone(&shared));

    let handle = thread::spawn(move || object.parse(&json!({"first": "Al", "last": "B"}).into()));
    let errors = handle.join().unwrap().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "last");
}

#[test]
fn test_boxed_validators_cross_threads() {
    let validators: Arc<Vec<Box<dyn ValueValidator>>> = Arc::new(vec![
        Box::new(Schema::number()),
        Box::new(Schema::boolean()),
        Box::new(Schema::as_number()),
    ]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validators = Arc::clone(&validators);
            thread::spawn(move || {
                validators
                    .iter()
                    .filter(|v| {
                        v.validate_value(&json!("5").into(), &gatekeep::JsonPath::root())
                            .is_success()
                    })
                    .count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

#[test]
fn test_stress_concurrent_validation() {
    let schema = Arc::new(Schema::array(user_schema()).max_len(100));
    let users: Vec<serde_json::Value> = (0..50)
        .map(|i| json!({"name": format!("u{}", i), "age": i + 1}))
        .collect();
    let input = Arc::new(Value::from(serde_json::Value::Array(users)));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let schema = Arc::clone(&schema);
            let input = Arc::clone(&input);
            thread::spawn(move || {
                for _ in 0..20 {
                    assert_eq!(schema.parse(&input).unwrap().len(), 50);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
