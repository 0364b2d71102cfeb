//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating finite numbers with
//! constraints like minimum/maximum value, sign requirements and integrality.

use std::ops::RangeInclusive;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::{format_number, Value};

use super::modifiers::TransformSchema;
use super::traits::{SchemaKind, SchemaLike};

/// A constraint applied to number values.
#[derive(Clone)]
enum NumberConstraint {
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
    Negative { message: Option<String> },
    Integer { message: Option<String> },
}

impl NumberConstraint {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            NumberConstraint::Min { message, .. }
            | NumberConstraint::Max { message, .. }
            | NumberConstraint::Positive { message }
            | NumberConstraint::NonNegative { message }
            | NumberConstraint::Negative { message }
            | NumberConstraint::Integer { message } => message,
        }
    }
}

/// A schema for validating numbers.
///
/// Only finite numbers are accepted: `NaN` and the infinities fail with a
/// `not_finite` error that is distinct from the plain type mismatch. All
/// constraint violations are accumulated rather than short-circuiting on the
/// first failure.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::number().min(0.0).max(100.0).integer();
///
/// assert_eq!(schema.parse(&json!(42).into()).unwrap(), 42.0);
///
/// let errors = schema.parse(&json!(-0.5).into()).unwrap_err();
/// assert_eq!(errors.len(), 2); // below minimum AND not an integer
///
/// let errors = schema.parse(&Value::Number(f64::NAN)).unwrap_err();
/// assert_eq!(errors.first().code, "not_finite");
/// ```
#[derive(Clone, Default)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a minimum value constraint (inclusive).
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds a maximum value constraint (inclusive).
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Adds both minimum and maximum value constraints (inclusive range).
    ///
    /// This is a convenience method equivalent to calling `.min(start).max(end)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().range(1.0..=100.0);
    ///
    /// assert!(schema.parse(&json!(50).into()).is_ok());
    /// assert!(schema.parse(&json!(150).into()).is_err());
    /// ```
    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        self.min(*range.start()).max(*range.end())
    }

    /// Requires the number to be greater than 0.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires the number to be greater than or equal to 0.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Requires the number to be less than 0.
    pub fn negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Negative { message: None });
        self
    }

    /// Requires the number to have no fractional part.
    pub fn integer(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Integer { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the message used when
    /// the value is not a number or is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number()
    ///     .min(18.0)
    ///     .error("must be at least 18 years old");
    ///
    /// let errors = schema.parse(&json!(16).into()).unwrap_err();
    /// assert_eq!(errors.first().message, "must be at least 18 years old");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(last) => *last.message_mut() = message,
            None => self.type_error_message = message,
        }
        self
    }

    /// Pins every validated number into `[min, max]`.
    ///
    /// Clamping happens after validation and never fails.
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let volume = Schema::number().clamp(0.0, 11.0);
    /// assert_eq!(volume.parse(&json!(15).into()).unwrap(), 11.0);
    /// assert_eq!(volume.parse(&json!(-3).into()).unwrap(), 0.0);
    /// ```
    pub fn clamp(self, min: f64, max: f64) -> TransformSchema<Self, impl Fn(f64) -> f64 + Send + Sync> {
        self.transform(move |n| n.max(min).min(max))
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<f64> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "number",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        if !n.is_finite() {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| "Expecting value to be a finite 'number'.".to_string());
            return failure(
                SchemaError::new(path.clone(), message)
                    .with_code("not_finite")
                    .with_expected("finite number")
                    .with_got(format_number(n)),
            );
        }

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, n, path))
            .collect();

        from_parts(n, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Number
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(constraint: &NumberConstraint, n: f64, path: &JsonPath) -> Option<SchemaError> {
    let (passed, code, expected, message) = match constraint {
        NumberConstraint::Min { value, message } => (
            n >= *value,
            "min_value",
            format!("at least {}", format_number(*value)),
            message,
        ),
        NumberConstraint::Max { value, message } => (
            n <= *value,
            "max_value",
            format!("at most {}", format_number(*value)),
            message,
        ),
        NumberConstraint::Positive { message } => {
            (n > 0.0, "positive", "positive".to_string(), message)
        }
        NumberConstraint::NonNegative { message } => {
            (n >= 0.0, "non_negative", "non-negative".to_string(), message)
        }
        NumberConstraint::Negative { message } => {
            (n < 0.0, "negative", "negative".to_string(), message)
        }
        NumberConstraint::Integer { message } => {
            (n.fract() == 0.0, "integer", "an integer".to_string(), message)
        }
    };

    if passed {
        return None;
    }

    let got = format_number(n);
    let msg = message
        .clone()
        .unwrap_or_else(|| format!("Expecting value to be {}. Got {}.", expected, got));
    Some(
        SchemaError::new(path.clone(), msg)
            .with_code(code)
            .with_expected(expected)
            .with_got(got),
    )
}
