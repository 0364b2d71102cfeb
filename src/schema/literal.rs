//! Literal and enumeration schemas.
//!
//! Both compare the input against scalar constants fixed at construction,
//! using strict scalar equality (no deep comparison, no conversion).

use stillwater::Validation;

use crate::error::{SchemaBuildError, SchemaError};
use crate::path::JsonPath;
use crate::validation::{failure, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

fn is_nan(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_nan())
}

/// A schema that accepts exactly one scalar constant.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::literal("hello").unwrap();
/// assert_eq!(schema.parse(&json!("hello").into()).unwrap(), Value::from("hello"));
///
/// let errors = schema.parse(&json!("bye").into()).unwrap_err();
/// assert_eq!(errors.first().message, "Expecting literal 'hello'. Got 'bye'.");
///
/// assert!(Schema::literal(vec![1, 2]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    constant: Value,
    message: Option<String>,
}

impl LiteralSchema {
    /// Creates a literal schema, rejecting non-scalar and NaN constants.
    pub fn new(constant: impl Into<Value>) -> Result<Self, SchemaBuildError> {
        let constant = constant.into();
        if !constant.is_scalar() {
            return Err(SchemaBuildError::NonScalarLiteral(constant.kind_name()));
        }
        if is_nan(&constant) {
            return Err(SchemaBuildError::NanLiteral);
        }
        Ok(Self {
            constant,
            message: None,
        })
    }

    /// Sets the message used on a mismatch.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The constant this schema accepts.
    pub fn constant(&self) -> &Value {
        &self.constant
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Value> {
        if *value == self.constant {
            return Validation::Success(value.clone());
        }
        let message = self.message.clone().unwrap_or_else(|| {
            format!("Expecting literal '{}'. Got '{}'.", self.constant, value)
        });
        failure(
            SchemaError::new(path.clone(), message)
                .with_code("invalid_literal")
                .with_expected(self.constant.to_string())
                .with_got(value.to_string()),
        )
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Literal
    }
}

/// A schema that accepts any member of a fixed set of scalar values.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let status = Schema::enumeration(["active", "retired"]).unwrap();
/// assert!(status.parse(&json!("active").into()).is_ok());
///
/// let errors = status.parse(&json!("lost").into()).unwrap_err();
/// assert_eq!(
///     errors.first().message,
///     "Expecting value to be one of 'active, retired'. Got 'lost'."
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EnumSchema {
    members: Vec<Value>,
    message: Option<String>,
}

impl EnumSchema {
    /// Creates an enumeration schema from its allowed members.
    ///
    /// The set must be non-empty and every member must be a non-NaN scalar.
    pub fn new<I, V>(members: I) -> Result<Self, SchemaBuildError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let members: Vec<Value> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(SchemaBuildError::EmptyEnum);
        }
        if let Some((index, member)) = members
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_scalar() || is_nan(m))
        {
            return Err(SchemaBuildError::NonScalarEnumMember {
                index,
                kind: member.kind_name(),
            });
        }
        Ok(Self {
            members,
            message: None,
        })
    }

    /// Sets the message used when the value is not a member.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn members(&self) -> &[Value] {
        &self.members
    }

    fn describe(&self) -> String {
        self.members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl SchemaLike for EnumSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Value> {
        if self.members.contains(value) {
            return Validation::Success(value.clone());
        }
        let allowed = self.describe();
        let message = self.message.clone().unwrap_or_else(|| {
            format!("Expecting value to be one of '{}'. Got '{}'.", allowed, value)
        });
        failure(
            SchemaError::new(path.clone(), message)
                .with_code("invalid_enum")
                .with_expected(format!("one of {}", allowed))
                .with_got(value.to_string()),
        )
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Enum
    }
}
