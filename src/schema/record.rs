//! Homogeneous keyed-map validation.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema for objects with arbitrary keys and uniformly typed values.
///
/// Every key is validated (as a string value) against the key schema and
/// every value against the value schema. Errors from both are reported
/// under the key being inspected and are accumulated across all entries.
/// Two input keys that the key schema maps to the same output key are an
/// error (`duplicate_key`) on the later one.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let scores = Schema::record(Schema::string().min_len(2), Schema::number());
///
/// let output = scores.parse(&json!({"ann": 3, "bob": 5}).into()).unwrap();
/// assert_eq!(output.get("bob"), Some(&5.0));
///
/// let errors = scores.parse(&json!({"x": 1, "cy": "2"}).into()).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone)]
pub struct RecordSchema<K, V> {
    key_schema: K,
    value_schema: V,
    type_error_message: Option<String>,
}

impl<K, V> RecordSchema<K, V>
where
    K: SchemaLike<Output = String>,
    V: SchemaLike,
{
    pub fn new(key_schema: K, value_schema: V) -> Self {
        Self {
            key_schema,
            value_schema,
            type_error_message: None,
        }
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl<K, V> SchemaLike for RecordSchema<K, V>
where
    K: SchemaLike<Output = String>,
    V: SchemaLike,
{
    type Output = IndexMap<String, V::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "object",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        let mut errors = Vec::new();
        let mut validated = IndexMap::with_capacity(obj.len());

        for (key, entry) in obj {
            let entry_path = path.push_field(key);
            let key_result = self
                .key_schema
                .validate(&Value::String(key.clone()), &entry_path);
            let value_result = self.value_schema.validate(entry, &entry_path);

            match (key_result, value_result) {
                (Validation::Success(k), Validation::Success(v)) => {
                    if validated.contains_key(&k) {
                        errors.push(
                            SchemaError::new(
                                entry_path,
                                format!("Duplicate key '{}' after key validation.", k),
                            )
                            .with_code("duplicate_key"),
                        );
                    } else {
                        validated.insert(k, v);
                    }
                }
                (Validation::Failure(e), Validation::Success(_))
                | (Validation::Success(_), Validation::Failure(e)) => errors.extend(e),
                (Validation::Failure(ke), Validation::Failure(ve)) => {
                    errors.extend(ke);
                    errors.extend(ve);
                }
            }
        }

        from_parts(validated, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumSchema, NumberSchema, StringSchema};
    use serde_json::json;

    #[test]
    fn test_accepts_homogeneous_maps() {
        let schema = RecordSchema::new(StringSchema::new(), NumberSchema::new());
        let output = schema.parse(&json!({"a": 1, "b": 2}).into()).unwrap();
        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(schema.parse(&json!({}).into()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_objects() {
        let schema = RecordSchema::new(StringSchema::new(), NumberSchema::new());
        let errors = schema.parse(&json!([1, 2]).into()).unwrap_err();
        assert_eq!(errors.first().message, "Expecting type 'object'. Got type 'array'.");
    }

    #[test]
    fn test_key_and_value_errors_carry_the_key() {
        let keys = StringSchema::new().min_len(3);
        let schema = RecordSchema::new(keys, NumberSchema::new());

        let errors = schema
            .parse(&json!({"ok_key": 1, "no": "x"}).into())
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.path.to_strings() == vec!["no"]));
        assert_eq!(errors.with_code("min_length").len(), 1);
        assert_eq!(errors.with_code("invalid_type").len(), 1);
    }

    #[test]
    fn test_key_schema_output_becomes_output_key() {
        let keys = StringSchema::new().chain(|k| k.to_uppercase());
        let schema = RecordSchema::new(keys, NumberSchema::new());
        let output = schema.parse(&json!({"eu": 1}).into()).unwrap();
        assert_eq!(output.get("EU"), Some(&1.0));
    }

    #[test]
    fn test_colliding_output_keys_are_rejected() {
        let keys = StringSchema::new().chain(|k| k.to_uppercase());
        let schema = RecordSchema::new(keys, NumberSchema::new());

        let errors = schema.parse(&json!({"eu": 1, "EU": 2}).into()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "duplicate_key");
        assert_eq!(errors.first().path.to_string(), "EU");
        assert_eq!(errors.first().message, "Duplicate key 'EU' after key validation.");
    }

    #[test]
    fn test_enumerated_keys() {
        let keys = EnumSchema::new(["dev", "prod"])
            .unwrap()
            .try_map(|v| match v {
                Value::String(s) => crate::validation::success(s),
                other => crate::validation::failure(SchemaError::new(
                    JsonPath::root(),
                    format!("unexpected key {}", other),
                )),
            });
        let schema = RecordSchema::new(keys, StringSchema::new());

        assert!(schema.parse(&json!({"dev": "a", "prod": "b"}).into()).is_ok());
        let errors = schema.parse(&json!({"qa": "c"}).into()).unwrap_err();
        assert_eq!(errors.first().code, "invalid_enum");
        assert_eq!(errors.first().path.to_string(), "qa");
    }
}
