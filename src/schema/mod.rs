//! Schema definitions for validation.
//!
//! This module provides schema types for validating dynamic values. Leaf
//! schemas (string, number, boolean, date, literal, enumeration, any) check
//! a single value; structural schemas (object, record, array, tuple) recurse
//! into children and prefix every child error with the key or index it came
//! from; modifiers and combinators wrap other schemas.
//!
//! Every structural schema accumulates all child errors rather than
//! short-circuiting on the first failure.
//!
//! # Example
//!
//! ```rust
//! use gatekeep::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let rocket = Schema::object()
//!     .field("name", Schema::string().non_empty())
//!     .field(
//!         "cores",
//!         Schema::array(Schema::object().field(
//!             "status",
//!             Schema::enumeration(["active", "lost"]).unwrap(),
//!         )),
//!     );
//!
//! let input = json!({
//!     "name": "Falcon",
//!     "cores": [{"status": "active"}, {"status": "active"}, {"status": "exploded"}]
//! });
//! let errors = rocket.parse(&input.into()).unwrap_err();
//! assert_eq!(errors.first().path.to_strings(), vec!["cores", "2", "status"]);
//! ```

mod any;
mod array;
mod boolean;
mod coerce;
mod combinators;
mod date;
mod literal;
mod modifiers;
mod numeric;
mod object;
mod record;
mod string;
mod traits;
mod tuple;

use crate::error::SchemaBuildError;
use crate::validation::ValidationResult;
use crate::value::Value;

pub use any::AnySchema;
pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use coerce::{Coercion, CoerceSchema};
pub use combinators::{IntersectionSchema, UnionSchema};
pub use date::DateSchema;
pub use literal::{EnumSchema, LiteralSchema};
pub use modifiers::{
    ChainSchema, DefaultSchema, NullableSchema, OptionalSchema, RefineSchema, TransformSchema,
    TryMapSchema,
};
pub use numeric::NumberSchema;
pub use object::{AdditionalPropertiesSetting, ObjectSchema};
pub use record::RecordSchema;
pub use string::{FormatSchema, StringSchema};
pub use traits::{SchemaKind, SchemaLike, ValueValidator};
pub use tuple::TupleSchema;

/// Entry point for creating validation schemas.
///
/// `Schema` provides factory methods for every schema type and combinator.
/// Schemas are built once, are immutable afterwards, and can be applied any
/// number of times from any number of threads.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let port = Schema::coerce(Schema::number().integer().range(1.0..=65535.0)).unwrap();
/// let settings = Schema::object()
///     .field("port", port)
///     .field("debug", Schema::defaulted(Schema::boolean(), false))
///     .field("proxy", Schema::optional(Schema::nullable(Schema::string())));
///
/// let output = settings.parse(&json!({"port": "8080"}).into()).unwrap();
/// assert_eq!(output.get("port"), Some(&gatekeep::Value::Number(8080.0)));
/// assert_eq!(output.get("debug"), Some(&gatekeep::Value::Bool(false)));
/// assert!(!output.contains_key("proxy"));
/// ```
pub struct Schema;

impl Schema {
    /// Creates a schema that accepts strings.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a schema that accepts finite numbers.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a schema that accepts booleans.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema that accepts date values.
    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    /// Creates a schema that accepts exactly `constant`.
    ///
    /// Fails if `constant` is not a string, number, boolean or null, or is NaN.
    pub fn literal(constant: impl Into<Value>) -> Result<LiteralSchema, SchemaBuildError> {
        LiteralSchema::new(constant)
    }

    /// Creates a schema that accepts any member of `members`.
    ///
    /// Fails if `members` is empty or holds a non-scalar or NaN value.
    pub fn enumeration<I, V>(members: I) -> Result<EnumSchema, SchemaBuildError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        EnumSchema::new(members)
    }

    /// Creates a schema that accepts every value unchanged.
    pub fn any() -> AnySchema {
        AnySchema::new()
    }

    /// Same as [`Schema::any`]; reads better where the payload is opaque.
    pub fn unknown() -> AnySchema {
        AnySchema::new()
    }

    /// Creates an object schema with no fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string().min_len(1))
    ///     .field("age", Schema::number().integer().positive())
    ///     .optional_field("email", Schema::email())
    ///     .default_field("role", Schema::string(), "user".to_string())
    ///     .additional_properties(false);
    ///
    /// assert!(schema.parse(&json!({"name": "Alice", "age": 30}).into()).is_ok());
    ///
    /// // Missing required field produces error
    /// assert!(schema.parse(&json!({"name": "Bob"}).into()).is_err());
    /// ```
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a schema for maps with validated keys and uniformly typed values.
    pub fn record<K, V>(key_schema: K, value_schema: V) -> RecordSchema<K, V>
    where
        K: SchemaLike<Output = String>,
        V: SchemaLike,
    {
        RecordSchema::new(key_schema, value_schema)
    }

    /// Creates a schema for arrays whose items all match `item_schema`.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }

    /// Creates a tuple schema; add positions with [`TupleSchema::item`].
    pub fn tuple() -> TupleSchema {
        TupleSchema::new()
    }

    /// Creates a union over `alternatives`, tried in order.
    pub fn union(alternatives: Vec<Box<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(alternatives)
    }

    /// Creates an intersection; add components with [`IntersectionSchema::and`].
    pub fn intersection() -> IntersectionSchema {
        IntersectionSchema::new()
    }

    /// Accepts `null` in addition to whatever `schema` accepts.
    pub fn nullable<S: SchemaLike>(schema: S) -> NullableSchema<S> {
        NullableSchema::new(schema)
    }

    /// Accepts an absent value in addition to whatever `schema` accepts.
    pub fn optional<S: SchemaLike>(schema: S) -> OptionalSchema<S> {
        OptionalSchema::new(schema)
    }

    /// Substitutes `fallback` for an absent value.
    pub fn defaulted<S>(schema: S, fallback: S::Output) -> DefaultSchema<S>
    where
        S: SchemaLike,
        S::Output: Clone + Send + Sync + 'static,
    {
        DefaultSchema::new(schema, fallback)
    }

    /// Substitutes the result of `fallback` for an absent value, calling it each time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use gatekeep::{Schema, SchemaLike, Value};
    ///
    /// let created_at = Schema::defaulted_with(Schema::date(), Utc::now);
    /// assert!(created_at.parse(&Value::Undefined).is_ok());
    /// ```
    pub fn defaulted_with<S, F>(schema: S, fallback: F) -> DefaultSchema<S>
    where
        S: SchemaLike,
        F: Fn() -> S::Output + Send + Sync + 'static,
    {
        DefaultSchema::with_fn(schema, fallback)
    }

    /// Adds a predicate that a successfully validated value must satisfy.
    pub fn refine<S, P>(schema: S, predicate: P, message: impl Into<String>) -> RefineSchema<S, P>
    where
        S: SchemaLike,
        P: Fn(&S::Output) -> bool + Send + Sync,
    {
        RefineSchema::new(schema, predicate, message)
    }

    /// Maps a successfully validated value into a new representation.
    pub fn transform<S, F, U>(schema: S, f: F) -> TransformSchema<S, F>
    where
        S: SchemaLike,
        F: Fn(S::Output) -> U + Send + Sync,
    {
        TransformSchema::new(schema, f)
    }

    /// Applies a fallible step to a successfully validated value.
    pub fn try_map<S, F, U>(schema: S, f: F) -> TryMapSchema<S, F>
    where
        S: SchemaLike,
        F: Fn(S::Output) -> ValidationResult<U> + Send + Sync,
    {
        TryMapSchema::new(schema, f)
    }

    /// Applies `f`, then any steps added with [`ChainSchema::then`], after validation.
    pub fn chain<S, F>(schema: S, f: F) -> ChainSchema<S>
    where
        S: SchemaLike,
        F: Fn(S::Output) -> S::Output + Send + Sync + 'static,
    {
        ChainSchema::new(schema).then(f)
    }

    /// Converts input before validating it with `schema`.
    ///
    /// The conversion is chosen by the schema's kind; kinds without one
    /// (structural schemas, literals, enumerations, any) are rejected.
    pub fn coerce<S: SchemaLike>(schema: S) -> Result<CoerceSchema<S>, SchemaBuildError> {
        CoerceSchema::new(schema)
    }

    /// A string schema that first stringifies numbers, booleans and dates.
    pub fn as_string() -> CoerceSchema<StringSchema> {
        CoerceSchema::with_coercion(StringSchema::new(), Coercion::ToString)
    }

    /// A number schema that first parses strings and converts booleans and dates.
    pub fn as_number() -> CoerceSchema<NumberSchema> {
        CoerceSchema::with_coercion(NumberSchema::new(), Coercion::ToNumber)
    }

    /// A boolean schema that first converts switch words (`true`/`yes`/`on`,
    /// `false`/`no`/`off`, any case) and `1`/`0`.
    pub fn as_boolean() -> CoerceSchema<BooleanSchema> {
        CoerceSchema::with_coercion(BooleanSchema::new(), Coercion::ToBoolean)
    }

    /// A date schema that first parses RFC 3339 / `YYYY-MM-DD` strings and epoch milliseconds.
    pub fn as_date() -> CoerceSchema<DateSchema> {
        CoerceSchema::with_coercion(DateSchema::new(), Coercion::ToDate)
    }

    /// A string schema that requires an email-address shape.
    pub fn email() -> FormatSchema {
        string::email()
    }

    /// Like [`Schema::email`] with a custom failure message.
    pub fn email_with_message(message: impl Into<String>) -> FormatSchema {
        string::email_with_message(message)
    }

    /// A string schema that requires a hyphenated UUID.
    pub fn uuid() -> FormatSchema {
        string::uuid()
    }

    /// Like [`Schema::uuid`] with a custom failure message.
    pub fn uuid_with_message(message: impl Into<String>) -> FormatSchema {
        string::uuid_with_message(message)
    }
}
