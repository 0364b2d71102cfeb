//! Date schema validation.
//!
//! A date value is a `chrono::DateTime<Utc>` carried by [`Value::Date`]. Text
//! and epoch numbers are not dates; use [`Schema::as_date`](crate::Schema::as_date)
//! to convert them first.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::Value;

use super::traits::{SchemaKind, SchemaLike};

#[derive(Clone)]
enum DateConstraint {
    Min {
        value: DateTime<Utc>,
        message: Option<String>,
    },
    Max {
        value: DateTime<Utc>,
        message: Option<String>,
    },
}

/// A schema for validating date values.
///
/// The validated output is a copy of the input instant.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use gatekeep::{Schema, SchemaLike, Value};
///
/// let launch = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// let schema = Schema::date().min(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
///
/// assert_eq!(schema.parse(&Value::Date(launch)).unwrap(), launch);
/// assert!(schema.parse(&Value::from("2024-03-01")).is_err());
/// ```
#[derive(Clone, Default)]
pub struct DateSchema {
    constraints: Vec<DateConstraint>,
    type_error_message: Option<String>,
}

impl DateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the date to be at or after `value`.
    pub fn min(mut self, value: DateTime<Utc>) -> Self {
        self.constraints.push(DateConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Requires the date to be at or before `value`.
    pub fn max(mut self, value: DateTime<Utc>) -> Self {
        self.constraints.push(DateConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent constraint, or the
    /// type error message if there are no constraints yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(DateConstraint::Min { message: m, .. })
            | Some(DateConstraint::Max { message: m, .. }) => *m = message,
            None => self.type_error_message = message,
        }
        self
    }
}

impl SchemaLike for DateSchema {
    type Output = DateTime<Utc>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<DateTime<Utc>> {
        let date = match value.as_date() {
            Some(date) => *date,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "date",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, &date, path))
            .collect();

        from_parts(date, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Date
    }
}

fn check_constraint(
    constraint: &DateConstraint,
    date: &DateTime<Utc>,
    path: &JsonPath,
) -> Option<SchemaError> {
    let (passed, code, word, bound, message) = match constraint {
        DateConstraint::Min { value, message } => (date >= value, "min_value", "at or after", value, message),
        DateConstraint::Max { value, message } => (date <= value, "max_value", "at or before", value, message),
    };
    if passed {
        return None;
    }

    let bound = bound.to_rfc3339_opts(SecondsFormat::Millis, true);
    let got = date.to_rfc3339_opts(SecondsFormat::Millis, true);
    let msg = message
        .clone()
        .unwrap_or_else(|| format!("Expecting date to be {} {}. Got {}.", word, bound, got));
    Some(
        SchemaError::new(path.clone(), msg)
            .with_code(code)
            .with_expected(format!("{} {}", word, bound))
            .with_got(got),
    )
}
