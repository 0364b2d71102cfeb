//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait implemented by every schema,
//! the type-erased [`ValueValidator`] used for heterogeneous children, and
//! the [`SchemaKind`] tag each schema declares.

use std::fmt::{self, Display};
use std::sync::Arc;

use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;
use crate::validation::ValidationResult;
use crate::value::Value;

use super::modifiers::{
    ChainSchema, DefaultSchema, NullableSchema, OptionalSchema, RefineSchema, TransformSchema,
    TryMapSchema,
};

/// The declared kind of a schema, fixed at construction.
///
/// Modifiers (nullable, refine, transform, ...) report the kind of the
/// schema they wrap. [`Schema::coerce`](crate::Schema::coerce) matches on
/// this tag to pick a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Date,
    Literal,
    Enum,
    Any,
    Object,
    Record,
    Array,
    Tuple,
    Union,
    Intersection,
}

impl Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Date => "date",
            SchemaKind::Literal => "literal",
            SchemaKind::Enum => "enum",
            SchemaKind::Any => "any",
            SchemaKind::Object => "object",
            SchemaKind::Record => "record",
            SchemaKind::Array => "array",
            SchemaKind::Tuple => "tuple",
            SchemaKind::Union => "union",
            SchemaKind::Intersection => "intersection",
        };
        f.write_str(name)
    }
}

/// A trait for schema types that can validate dynamic values.
///
/// A schema is an immutable validator: `validate` never mutates the schema,
/// so one schema value can be applied any number of times, from any number
/// of threads. The `Send + Sync` bounds make that explicit and allow schemas
/// to live in trait objects like `Box<dyn ValueValidator>`.
///
/// `path` is the location of `value` inside the root input. Composite
/// schemas extend it before handing a child value to a child schema, so every
/// error already carries its full location.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let username = Schema::string()
///     .min_len(3)
///     .chain(|s| s.trim().to_lowercase())
///     .refine(|s| !s.contains(' '), "username must not contain spaces");
///
/// assert_eq!(username.parse(&json!("  Alice ").into()).unwrap(), "alice");
/// assert!(username.parse(&json!("Alice Smith").into()).is_err());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value against this schema.
    ///
    /// Returns `Validation::Success` with the validated value on success,
    /// or `Validation::Failure` with accumulated errors on failure.
    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output>;

    /// Returns the declared kind of this schema.
    fn kind(&self) -> SchemaKind;

    /// Validates `value` from the root and converts the outcome to a `Result`.
    fn parse(&self, value: &Value) -> Result<Self::Output, SchemaErrors> {
        match self.validate(value, &JsonPath::root()) {
            Validation::Success(output) => Ok(output),
            Validation::Failure(errors) => {
                tracing::debug!(
                    kind = %self.kind(),
                    errors = errors.len(),
                    first_path = %errors.first().path,
                    "validation failed"
                );
                Err(errors)
            }
        }
    }

    /// Validates `value` from the root, panicking with every rendered error on failure.
    ///
    /// This is the only place validation errors become a panic. Prefer
    /// [`parse`](SchemaLike::parse) unless invalid input is a bug.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not conform to this schema.
    fn parse_or_panic(&self, value: &Value) -> Self::Output {
        match self.parse(value) {
            Ok(output) => output,
            Err(errors) => panic!("{}", errors),
        }
    }

    /// Adds a predicate that a successfully validated value must satisfy.
    fn refine<P>(self, predicate: P, message: impl Into<String>) -> RefineSchema<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Output) -> bool + Send + Sync,
    {
        RefineSchema::new(self, predicate, message)
    }

    /// Maps a successfully validated value into a new representation.
    fn transform<U, F>(self, f: F) -> TransformSchema<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        TransformSchema::new(self, f)
    }

    /// Applies a fallible step to a successfully validated value.
    ///
    /// Errors returned by `f` are reported relative to the value's path.
    fn try_map<U, F>(self, f: F) -> TryMapSchema<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> ValidationResult<U> + Send + Sync,
    {
        TryMapSchema::new(self, f)
    }

    /// Applies a pure same-type step after successful validation.
    ///
    /// Further steps can be appended with [`ChainSchema::then`].
    fn chain<F>(self, f: F) -> ChainSchema<Self>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Self::Output + Send + Sync + 'static,
    {
        ChainSchema::new(self).then(f)
    }

    /// Accepts `null` in addition to whatever this schema accepts.
    fn nullable(self) -> NullableSchema<Self>
    where
        Self: Sized,
    {
        NullableSchema::new(self)
    }

    /// Accepts an absent value in addition to whatever this schema accepts.
    fn optional(self) -> OptionalSchema<Self>
    where
        Self: Sized,
    {
        OptionalSchema::new(self)
    }

    /// Substitutes `fallback` when the value is absent.
    fn with_default(self, fallback: Self::Output) -> DefaultSchema<Self>
    where
        Self: Sized,
        Self::Output: Clone + Send + Sync + 'static,
    {
        DefaultSchema::new(self, fallback)
    }

    /// Substitutes a freshly computed value when the value is absent.
    fn with_default_fn<F>(self, fallback: F) -> DefaultSchema<Self>
    where
        Self: Sized,
        F: Fn() -> Self::Output + Send + Sync + 'static,
    {
        DefaultSchema::with_fn(self, fallback)
    }
}

impl<S: SchemaLike + ?Sized> SchemaLike for Box<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        (**self).validate(value, path)
    }

    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }
}

impl<S: SchemaLike + ?Sized> SchemaLike for Arc<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        (**self).validate(value, path)
    }

    fn kind(&self) -> SchemaKind {
        (**self).kind()
    }
}

/// A type-erased trait for schemas that validate to dynamic values.
///
/// `ValueValidator` lets schemas with different output types sit side by
/// side: object fields, tuple positions and union alternatives are stored as
/// `Box<dyn ValueValidator>`. Any `SchemaLike` whose output converts into a
/// [`Value`] implements it automatically.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, ValueValidator};
///
/// let validators: Vec<Box<dyn ValueValidator>> = vec![
///     Box::new(Schema::string().min_len(1)),
///     Box::new(Schema::number().positive()),
/// ];
/// ```
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a [`Value`].
    fn validate_value(&self, value: &Value, path: &JsonPath) -> ValidationResult<Value>;
}

impl<S> ValueValidator for S
where
    S: SchemaLike,
    S::Output: Into<Value>,
{
    fn validate_value(&self, value: &Value, path: &JsonPath) -> ValidationResult<Value> {
        self.validate(value, path).map(Into::into)
    }
}
