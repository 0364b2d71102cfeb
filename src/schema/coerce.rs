//! Best-effort conversion in front of a strict schema.
//!
//! Coercion converts the input and hands the result to the wrapped schema,
//! which still has the final say: an input that cannot be converted is passed
//! on unchanged (or as a `NaN` number) and fails with the wrapped schema's
//! own error.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::SchemaBuildError;
use crate::path::JsonPath;
use crate::validation::ValidationResult;
use crate::value::{format_number, Value};

use super::traits::{SchemaKind, SchemaLike};

/// The conversion applied before validation, selected by the wrapped schema's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    ToString,
    ToNumber,
    ToBoolean,
    ToDate,
}

impl Coercion {
    /// Returns the conversion for `kind`, if that kind has one.
    pub fn for_kind(kind: SchemaKind) -> Option<Self> {
        match kind {
            SchemaKind::String => Some(Coercion::ToString),
            SchemaKind::Number => Some(Coercion::ToNumber),
            SchemaKind::Boolean => Some(Coercion::ToBoolean),
            SchemaKind::Date => Some(Coercion::ToDate),
            SchemaKind::Literal
            | SchemaKind::Enum
            | SchemaKind::Any
            | SchemaKind::Object
            | SchemaKind::Record
            | SchemaKind::Array
            | SchemaKind::Tuple
            | SchemaKind::Union
            | SchemaKind::Intersection => None,
        }
    }

    /// Converts `value`, borrowing it when no conversion applies.
    pub fn apply<'a>(&self, value: &'a Value) -> Cow<'a, Value> {
        let converted = match self {
            Coercion::ToString => to_string(value),
            Coercion::ToNumber => to_number(value),
            Coercion::ToBoolean => to_boolean(value),
            Coercion::ToDate => to_date(value),
        };
        match converted {
            Some(converted) => Cow::Owned(converted),
            None => Cow::Borrowed(value),
        }
    }
}

fn to_string(value: &Value) -> Option<Value> {
    let text = match value {
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::Date(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
        _ => return None,
    };
    Some(Value::String(text))
}

fn to_number(value: &Value) -> Option<Value> {
    let n = match value {
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Date(date) => date.timestamp_millis() as f64,
        _ => return None,
    };
    Some(Value::Number(n))
}

fn to_boolean(value: &Value) -> Option<Value> {
    let b = match value {
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => true,
            "false" | "no" | "off" => false,
            _ => return None,
        },
        Value::Number(n) if *n == 1.0 => true,
        Value::Number(n) if *n == 0.0 => false,
        _ => return None,
    };
    Some(Value::Bool(b))
}

fn to_date(value: &Value) -> Option<Value> {
    let date = match value {
        Value::String(s) => parse_date(s.trim())?,
        Value::Number(n) if n.is_finite() => DateTime::from_timestamp_millis(n.trunc() as i64)?,
        _ => return None,
    };
    Some(Value::Date(date))
}

/// Parses RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Wraps a string, number, boolean or date schema with a pre-conversion.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let port = Schema::coerce(Schema::number().integer()).unwrap();
/// assert_eq!(port.parse(&json!("8080").into()).unwrap(), 8080.0);
/// assert!(port.parse(&json!("http").into()).is_err());
///
/// assert!(Schema::coerce(Schema::object()).is_err());
/// ```
#[derive(Clone)]
pub struct CoerceSchema<S> {
    inner: S,
    coercion: Coercion,
}

impl<S: SchemaLike> CoerceSchema<S> {
    /// Wraps `inner`, failing when its kind has no conversion.
    pub fn new(inner: S) -> Result<Self, SchemaBuildError> {
        let kind = inner.kind();
        let coercion = Coercion::for_kind(kind).ok_or(SchemaBuildError::UnsupportedCoercion(kind))?;
        Ok(Self::with_coercion(inner, coercion))
    }

    pub(crate) fn with_coercion(inner: S, coercion: Coercion) -> Self {
        Self { inner, coercion }
    }

    pub fn coercion(&self) -> Coercion {
        self.coercion
    }
}

impl<S: SchemaLike> SchemaLike for CoerceSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        let converted = self.coercion.apply(value);
        if let Cow::Owned(ref to) = converted {
            tracing::trace!(
                path = %path,
                from = value.kind_name(),
                to = to.kind_name(),
                "coerced value"
            );
        }
        self.inner.validate(&converted, path)
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}
