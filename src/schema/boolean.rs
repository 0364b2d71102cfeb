//! Boolean schema validation.

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

/// A schema that accepts `true` or `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message used when the value is not a boolean.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<bool> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => failure(SchemaError::invalid_type(
                path,
                "boolean",
                value,
                self.type_error_message.as_ref(),
            )),
        }
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Boolean
    }
}
