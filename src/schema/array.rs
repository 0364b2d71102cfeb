//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating homogeneous lists,
//! with every item checked against one item schema.

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema for validating arrays whose items all share one schema.
///
/// Each item is validated at its index path. Item errors and length
/// violations are accumulated; the output is a freshly built `Vec` holding
/// every validated item in input order.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string()).max_len(3);
///
/// let tags = schema.parse(&json!(["a", "b"]).into()).unwrap();
/// assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
///
/// let errors = schema.parse(&json!(["x", 1]).into()).unwrap_err();
/// assert_eq!(errors.first().path.to_strings(), vec!["1"]);
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    item_schema: S,
    min_len: Option<(usize, Option<String>)>,
    max_len: Option<(usize, Option<String>)>,
    type_error_message: Option<String>,
    last_set: Option<LengthBound>,
}

#[derive(Clone, Copy)]
enum LengthBound {
    Min,
    Max,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema validating each item with `item_schema`.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            min_len: None,
            max_len: None,
            type_error_message: None,
            last_set: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some((min, None));
        self.last_set = Some(LengthBound::Min);
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some((max, None));
        self.last_set = Some(LengthBound::Max);
        self
    }

    /// Requires at least one item.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent length constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not an array).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.last_set {
            Some(LengthBound::Min) => {
                if let Some((_, m)) = self.min_len.as_mut() {
                    *m = message;
                }
            }
            Some(LengthBound::Max) => {
                if let Some((_, m)) = self.max_len.as_mut() {
                    *m = message;
                }
            }
            None => self.type_error_message = message,
        }
        self
    }

    fn check_length(&self, len: usize, path: &JsonPath) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        if let Some((min, message)) = &self.min_len {
            if len < *min {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("Expecting at least {} items. Got {}.", min, len)
                });
                errors.push(
                    SchemaError::new(path.clone(), msg)
                        .with_code("min_items")
                        .with_expected(format!("at least {} items", min))
                        .with_got(format!("{} items", len)),
                );
            }
        }
        if let Some((max, message)) = &self.max_len {
            if len > *max {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("Expecting at most {} items. Got {}.", max, len)
                });
                errors.push(
                    SchemaError::new(path.clone(), msg)
                        .with_code("max_items")
                        .with_expected(format!("at most {} items", max))
                        .with_got(format!("{} items", len)),
                );
            }
        }
        errors
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "array",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        let mut errors = self.check_length(items.len(), path);
        let mut validated = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self.item_schema.validate(item, &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        from_parts(validated, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Array
    }
}
