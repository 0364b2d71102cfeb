//! Modifier schemas that wrap another schema.
//!
//! Modifiers never inspect structure themselves. They either intercept a
//! sentinel (`null`, absent) before delegating, or post-process the wrapped
//! schema's successful output. Failures of the wrapped schema always pass
//! through unchanged.

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{and_then, failure, ValidationResult};
use crate::value::{Presence, Value};

use super::traits::{SchemaKind, SchemaLike};

/// Accepts `null`, delegating everything else to the inner schema.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::nullable(Schema::string());
/// assert_eq!(schema.parse(&json!(null).into()).unwrap(), None);
/// assert_eq!(schema.parse(&json!("a").into()).unwrap(), Some("a".to_string()));
/// assert!(schema.parse(&gatekeep::Value::Undefined).is_err());
/// ```
#[derive(Clone)]
pub struct NullableSchema<S> {
    inner: S,
}

impl<S: SchemaLike> NullableSchema<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for NullableSchema<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        if value.is_null() {
            Validation::Success(None)
        } else {
            self.inner.validate(value, path).map(Some)
        }
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

/// Accepts an absent value, delegating everything else to the inner schema.
///
/// `null` is not absent: wrap in both `optional` and `nullable` to accept
/// either sentinel.
#[derive(Clone)]
pub struct OptionalSchema<S> {
    inner: S,
}

impl<S: SchemaLike> OptionalSchema<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Presence<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        if value.is_undefined() {
            Validation::Success(Presence::Absent)
        } else {
            self.inner.validate(value, path).map(Presence::Present)
        }
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

type Fallback<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Substitutes a fallback when the value is absent.
///
/// A present value is always validated by the inner schema; an invalid
/// present value fails rather than silently becoming the fallback.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::defaulted(Schema::number(), 10.0);
/// assert_eq!(schema.parse(&Value::Undefined).unwrap(), 10.0);
/// assert_eq!(schema.parse(&json!(3).into()).unwrap(), 3.0);
/// assert!(schema.parse(&json!("x").into()).is_err());
/// ```
pub struct DefaultSchema<S: SchemaLike> {
    inner: S,
    fallback: Fallback<S::Output>,
}

impl<S: SchemaLike> DefaultSchema<S> {
    /// Uses a clone of `fallback` for every absent value.
    pub fn new(inner: S, fallback: S::Output) -> Self
    where
        S::Output: Clone + Send + Sync + 'static,
    {
        Self {
            inner,
            fallback: Box::new(move || fallback.clone()),
        }
    }

    /// Calls `fallback` for every absent value.
    pub fn with_fn<F>(inner: S, fallback: F) -> Self
    where
        F: Fn() -> S::Output + Send + Sync + 'static,
    {
        Self {
            inner,
            fallback: Box::new(fallback),
        }
    }
}

impl<S: SchemaLike> SchemaLike for DefaultSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        if value.is_undefined() {
            Validation::Success((self.fallback)())
        } else {
            self.inner.validate(value, path)
        }
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

/// Layers a predicate over a successful validation.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let even = Schema::number().refine(|n| n % 2.0 == 0.0, "must be even");
/// assert!(even.parse(&json!(4).into()).is_ok());
///
/// let errors = even.parse(&json!(3).into()).unwrap_err();
/// assert_eq!(errors.first().message, "must be even");
/// assert_eq!(errors.first().code, "refinement");
/// ```
pub struct RefineSchema<S, P> {
    inner: S,
    predicate: P,
    message: String,
    code: String,
}

impl<S, P> RefineSchema<S, P>
where
    S: SchemaLike,
    P: Fn(&S::Output) -> bool + Send + Sync,
{
    pub fn new(inner: S, predicate: P, message: impl Into<String>) -> Self {
        Self {
            inner,
            predicate,
            message: message.into(),
            code: "refinement".to_string(),
        }
    }

    /// Sets the error code reported when the predicate fails.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl<S, P> SchemaLike for RefineSchema<S, P>
where
    S: SchemaLike,
    P: Fn(&S::Output) -> bool + Send + Sync,
{
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        and_then(self.inner.validate(value, path), |output| {
            if (self.predicate)(&output) {
                Validation::Success(output)
            } else {
                failure(SchemaError::new(path.clone(), self.message.clone()).with_code(&self.code))
            }
        })
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

/// Maps a successful output into another type.
pub struct TransformSchema<S, F> {
    inner: S,
    f: F,
}

impl<S, F> TransformSchema<S, F> {
    pub fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F, U> SchemaLike for TransformSchema<S, F>
where
    S: SchemaLike,
    F: Fn(S::Output) -> U + Send + Sync,
{
    type Output = U;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<U> {
        self.inner.validate(value, path).map(&self.f)
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

/// Runs a fallible step after a successful validation.
///
/// The step reports errors relative to the validated value; they are moved
/// under the current path before being returned.
///
/// # Example
///
/// ```rust
/// use gatekeep::validation::{failure, success};
/// use gatekeep::{JsonPath, Schema, SchemaError, SchemaLike};
/// use serde_json::json;
///
/// let port = Schema::string().try_map(|s| match s.parse::<u16>() {
///     Ok(port) => success(port),
///     Err(e) => failure(SchemaError::new(JsonPath::root(), e.to_string())),
/// });
///
/// let schema = Schema::object().field("port", port.transform(f64::from));
/// let errors = schema.parse(&json!({"port": "http"}).into()).unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "port");
/// ```
pub struct TryMapSchema<S, F> {
    inner: S,
    f: F,
}

impl<S, F> TryMapSchema<S, F> {
    pub fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F, U> SchemaLike for TryMapSchema<S, F>
where
    S: SchemaLike,
    F: Fn(S::Output) -> ValidationResult<U> + Send + Sync,
{
    type Output = U;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<U> {
        and_then(self.inner.validate(value, path), |output| {
            match (self.f)(output) {
                Validation::Failure(errors) => Validation::Failure(errors.relocate(path)),
                success => success,
            }
        })
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}

type Step<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Applies a sequence of same-type steps, in order, after a successful validation.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let slug = Schema::string()
///     .chain(|s| s.trim().to_string())
///     .then(|s| s.to_lowercase())
///     .then(|s| s.replace(' ', "-"));
///
/// assert_eq!(slug.parse(&json!("  Hello World ").into()).unwrap(), "hello-world");
/// ```
pub struct ChainSchema<S: SchemaLike> {
    inner: S,
    steps: Vec<Step<S::Output>>,
}

impl<S: SchemaLike> ChainSchema<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(S::Output) -> S::Output + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }
}

impl<S: SchemaLike> SchemaLike for ChainSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<Self::Output> {
        self.inner
            .validate(value, path)
            .map(|output| self.steps.iter().fold(output, |acc, step| step(acc)))
    }

    fn kind(&self) -> SchemaKind {
        self.inner.kind()
    }
}
