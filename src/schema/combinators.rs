//! Schema combinators for composing validation logic.
//!
//! This module provides the two logical combinators:
//! - [`UnionSchema`]: the first alternative that accepts the value wins
//! - [`IntersectionSchema`]: every object schema must accept the value, and
//!   their outputs are merged
//!
//! # Example
//!
//! ```rust
//! use gatekeep::{Schema, SchemaLike, Value, ValueValidator};
//! use serde_json::json;
//!
//! // Flexible type - numeric or textual ID
//! let id = Schema::union(vec![
//!     Box::new(Schema::number().positive()) as Box<dyn ValueValidator>,
//!     Box::new(Schema::string().min_len(1)) as Box<dyn ValueValidator>,
//! ]);
//! assert_eq!(id.parse(&json!("abc").into()).unwrap(), Value::from("abc"));
//!
//! // Shape composition
//! let named = Schema::object().field("name", Schema::string());
//! let aged = Schema::object().field("age", Schema::number());
//! let person = Schema::intersection().and(named).and(aged);
//! let output = person.parse(&json!({"name": "Ann", "age": 40}).into()).unwrap();
//! assert_eq!(output.len(), 2);
//! ```

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::{ObjectMap, Value};

use super::traits::{SchemaKind, SchemaLike, ValueValidator};

/// A schema that accepts a value if any alternative does.
///
/// Alternatives are tried in declaration order and the first success is
/// returned; later alternatives are never run. When every alternative
/// fails, the errors of all alternatives are returned in declaration order,
/// or a single `union_no_match` error if a message was set with
/// [`error`](UnionSchema::error).
pub struct UnionSchema {
    alternatives: Vec<Box<dyn ValueValidator>>,
    message: Option<String>,
}

impl UnionSchema {
    pub fn new(alternatives: Vec<Box<dyn ValueValidator>>) -> Self {
        Self {
            alternatives,
            message: None,
        }
    }

    /// Appends an alternative.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let flag = Schema::union(Vec::new())
    ///     .or(Schema::boolean())
    ///     .or(Schema::literal("auto").unwrap());
    ///
    /// assert!(flag.parse(&json!(true).into()).is_ok());
    /// assert!(flag.parse(&json!("auto").into()).is_ok());
    /// assert_eq!(flag.parse(&json!("on").into()).unwrap_err().len(), 2);
    /// ```
    pub fn or<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
        S::Output: Into<Value>,
    {
        self.alternatives.push(Box::new(schema));
        self
    }

    /// Replaces the per-alternative errors with one `union_no_match` error.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn no_match(&self, message: String, value: &Value, path: &JsonPath) -> SchemaError {
        SchemaError::new(path.clone(), message)
            .with_code("union_no_match")
            .with_expected(format!("one of {} alternatives", self.alternatives.len()))
            .with_got(value.kind_name())
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Value> {
        let mut errors = Vec::new();

        for (branch, alternative) in self.alternatives.iter().enumerate() {
            match alternative.validate_value(value, path) {
                Validation::Success(v) => {
                    tracing::trace!(path = %path, branch, "union alternative matched");
                    return Validation::Success(v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if let Some(message) = &self.message {
            return failure(self.no_match(message.clone(), value, path));
        }
        if errors.is_empty() {
            let message = "Expecting value to match at least one alternative.".to_string();
            return failure(self.no_match(message, value, path));
        }
        from_parts(Value::Undefined, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Union
    }
}

/// A schema that requires every object component to accept the value.
///
/// Each component validates the same input. If all succeed, their outputs
/// are merged in declaration order, with later components overwriting
/// earlier ones on shared keys. If any fail, the errors of every failing
/// component are returned and nothing is merged.
pub struct IntersectionSchema {
    components: Vec<Box<dyn SchemaLike<Output = ObjectMap>>>,
    type_error_message: Option<String>,
}

impl IntersectionSchema {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a component whose output is an object map.
    pub fn and<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike<Output = ObjectMap> + 'static,
    {
        self.components.push(Box::new(schema));
        self
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for IntersectionSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for IntersectionSchema {
    type Output = ObjectMap;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<ObjectMap> {
        if value.as_object().is_none() {
            return failure(SchemaError::invalid_type(
                path,
                "object",
                value,
                self.type_error_message.as_ref(),
            ));
        }

        let mut errors = Vec::new();
        let mut merged = ObjectMap::new();

        for component in &self.components {
            match component.validate(value, path) {
                Validation::Success(output) => merged.extend(output),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        from_parts(merged, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Intersection
    }
}
