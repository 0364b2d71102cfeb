//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! constraints like minimum/maximum length and regex patterns, plus the
//! fixed-format [`email`] and [`uuid`] schemas built on top of it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{SchemaBuildError, SchemaError};
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::Value;

use super::modifiers::RefineSchema;
use super::traits::{SchemaKind, SchemaLike};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern compiles")
});

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// `StringSchema` validates that values are strings and optionally applies
/// constraints like minimum/maximum length and regex patterns. All constraint
/// violations are accumulated rather than short-circuiting on the first failure.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// // Reports both: too short AND pattern mismatch
/// let errors = schema.parse(&json!("AB").into()).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a minimum length constraint, counted in Unicode scalar values.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint, counted in Unicode scalar values.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires at least one character.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Adds a regex pattern constraint.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let digits = Schema::string().pattern(r"^\d+$").unwrap();
    /// assert!(digits.parse(&json!("12345").into()).is_ok());
    /// assert!(digits.parse(&json!("abc").into()).is_err());
    ///
    /// assert!(Schema::string().pattern("[").is_err());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, SchemaBuildError> {
        let regex = Regex::new(pattern)?;
        self.constraints
            .push(StringConstraint::Pattern { regex, message: None });
        Ok(self)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a string).
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string()
    ///     .min_len(5)
    ///     .error("username must be at least 5 characters");
    ///
    /// let errors = schema.parse(&json!("hi").into()).unwrap_err();
    /// assert_eq!(errors.first().message, "username must be at least 5 characters");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = message,
            None => self.type_error_message = message,
        }
        self
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<String> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "string",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        from_parts(s.to_string(), errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::String
    }
}

fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("Expecting length to be at least {}. Got {}.", min, len)
                });
                SchemaError::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("Expecting length to be at most {}. Got {}.", max, len)
                });
                SchemaError::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message.clone().unwrap_or_else(|| {
                format!("Expecting string to match pattern '{}'.", regex.as_str())
            });
            SchemaError::new(path.clone(), msg)
                .with_code("pattern")
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_got(value)
        }),
    }
}

/// A string schema narrowed by a fixed-format predicate.
pub type FormatSchema = RefineSchema<StringSchema, fn(&String) -> bool>;

#[allow(clippy::ptr_arg)]
fn is_email(s: &String) -> bool {
    EMAIL_REGEX.is_match(s)
}

#[allow(clippy::ptr_arg)]
fn is_uuid(s: &String) -> bool {
    UUID_REGEX.is_match(s)
}

/// A string that looks like an email address.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// assert!(Schema::email().parse(&json!("ada@example.com").into()).is_ok());
/// assert!(Schema::email().parse(&json!("ada@example").into()).is_err());
/// ```
pub fn email() -> FormatSchema {
    email_with_message("Expecting string to be a valid email address")
}

/// Like [`email`], reporting `message` on a format mismatch.
pub fn email_with_message(message: impl Into<String>) -> FormatSchema {
    StringSchema::new().refine(is_email as fn(&String) -> bool, message)
}

/// A string in canonical hyphenated UUID form (any version, either case).
pub fn uuid() -> FormatSchema {
    uuid_with_message("Expecting string to be a valid uuid")
}

/// Like [`uuid`], reporting `message` on a format mismatch.
pub fn uuid_with_message(message: impl Into<String>) -> FormatSchema {
    StringSchema::new().refine(is_uuid as fn(&String) -> bool, message)
}
