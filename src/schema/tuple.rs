//! Fixed-arity tuple validation.

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike, ValueValidator};

/// A schema for arrays with one schema per position.
///
/// Position `i` of the input is validated against the `i`-th schema. A
/// short input is padded with [`Value::Undefined`], so a missing trailing
/// position fails unless its schema accepts absence. Input elements beyond
/// the declared arity are dropped from the output.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let pair = Schema::tuple().item(Schema::number()).item(Schema::string());
///
/// let output = pair.parse(&json!([1, "a", true, {}]).into()).unwrap();
/// assert_eq!(output, vec![Value::Number(1.0), Value::from("a")]);
///
/// let errors = pair.parse(&json!([1]).into()).unwrap_err();
/// assert_eq!(errors.first().path.to_strings(), vec!["1"]);
/// ```
pub struct TupleSchema {
    items: Vec<Box<dyn ValueValidator>>,
    type_error_message: Option<String>,
}

impl TupleSchema {
    /// Creates a tuple schema with no positions.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            type_error_message: None,
        }
    }

    /// Creates a tuple schema from already type-erased position schemas.
    pub fn from_validators(items: Vec<Box<dyn ValueValidator>>) -> Self {
        Self {
            items,
            type_error_message: None,
        }
    }

    /// Appends a position validated by `schema`.
    pub fn item<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
        S::Output: Into<Value>,
    {
        self.items.push(Box::new(schema));
        self
    }

    /// Sets the message used when the value is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// The number of declared positions.
    pub fn arity(&self) -> usize {
        self.items.len()
    }
}

impl Default for TupleSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for TupleSchema {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Vec<Value>> {
        if value.as_array().is_none() {
            return failure(SchemaError::invalid_type(
                path,
                "array",
                value,
                self.type_error_message.as_ref(),
            ));
        }

        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(self.items.len());

        for (index, schema) in self.items.iter().enumerate() {
            match schema.validate_value(value.at(index), &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        from_parts(validated, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Tuple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BooleanSchema, NumberSchema, StringSchema};
    use crate::value::Presence;
    use serde_json::json;

    fn point() -> TupleSchema {
        TupleSchema::new()
            .item(NumberSchema::new())
            .item(NumberSchema::new())
    }

    #[test]
    fn test_exact_arity() {
        let output = point().parse(&json!([1, 2]).into()).unwrap();
        assert_eq!(output, vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(point().arity(), 2);
    }

    #[test]
    fn test_truncates_extra_elements() {
        let output = point().parse(&json!([1, 2, 3, "x"]).into()).unwrap();
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn test_missing_positions_are_undefined() {
        let errors = point().parse(&json!([]).into()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.first().message,
            "Expecting type 'number'. Got type 'undefined'."
        );
    }

    #[test]
    fn test_optional_trailing_position() {
        let schema = TupleSchema::new()
            .item(StringSchema::new())
            .item(BooleanSchema::new().optional());
        let output = schema.parse(&json!(["a"]).into()).unwrap();
        assert_eq!(output, vec![Value::from("a"), Value::from(Presence::<bool>::Absent)]);
    }

    #[test]
    fn test_position_errors_accumulate() {
        let schema = TupleSchema::new()
            .item(StringSchema::new())
            .item(NumberSchema::new())
            .item(BooleanSchema::new());
        let errors = schema.parse(&json!([1, 2, 3]).into()).unwrap_err();
        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["[0]", "[2]"]);
    }

    #[test]
    fn test_rejects_non_arrays() {
        let errors = point().parse(&json!({"0": 1, "1": 2}).into()).unwrap_err();
        assert_eq!(errors.first().code, "invalid_type");

        let errors = point().error("expected [x, y]").parse(&Value::Null).unwrap_err();
        assert_eq!(errors.first().message, "expected [x, y]");
    }
}
