//! Pass-through schemas.

use stillwater::Validation;

use crate::path::JsonPath;
use crate::validation::ValidationResult;
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema that accepts every value unchanged, `Undefined` included.
///
/// This defeats validation entirely. Reach for it only where a payload
/// really is opaque, e.g. a metadata blob forwarded as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl AnySchema {
    pub fn new() -> Self {
        AnySchema
    }
}

impl SchemaLike for AnySchema {
    type Output = Value;

    fn validate(&self, value: &Value, _path: &JsonPath) -> ValidationResult<Value> {
        Validation::Success(value.clone())
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passes_everything_through() {
        let inputs: Vec<Value> = vec![
            Value::Undefined,
            Value::Null,
            json!([1, "a", null]).into(),
            json!({"nested": {"deep": true}}).into(),
            Value::Number(f64::NAN),
        ];
        for input in inputs {
            let output = AnySchema::new().parse(&input).unwrap();
            match (&input, &output) {
                (Value::Number(a), Value::Number(b)) if a.is_nan() => assert!(b.is_nan()),
                _ => assert_eq!(output, input),
            }
        }
    }
}
