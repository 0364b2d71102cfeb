//! # Gatekeep
//!
//! A runtime validation library for dynamic data: decoded JSON, config
//! payloads and other untrusted input whose shape is only known at run time.
//!
//! ## Overview
//!
//! Schemas are built once by composing small combinators and then applied to
//! any number of inputs. A validation either succeeds with a fresh,
//! type-narrowed output or fails with every error it found, each one
//! carrying the path to the offending value (e.g. `rocket.cores[2].status`).
//! Results are stillwater [`Validation`](stillwater::Validation)s, so errors
//! accumulate instead of short-circuiting on the first failure.
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic input (and `Value`-typed output) representation
//! - [`Schema`]: entry point for creating validation schemas
//! - [`SchemaLike`]: the trait every schema implements
//! - [`JsonPath`]: the location of a value inside the input
//! - [`SchemaError`]: a single validation error with context (path, message, expected/got values)
//! - [`SchemaErrors`]: a non-empty collection of validation errors
//! - [`SchemaBuildError`]: a schema that was misconfigured at construction time
//!
//! ## Example
//!
//! ```rust
//! use gatekeep::{Schema, SchemaLike, Value};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("id", Schema::uuid())
//!     .field("email", Schema::email())
//!     .field("age", Schema::number().integer().non_negative())
//!     .optional_field("tags", Schema::array(Schema::string().non_empty()));
//!
//! let input = json!({
//!     "id": "123e4567-e89b-12d3-a456-426614174000",
//!     "email": "ada@example.com",
//!     "age": 36,
//!     "password": "hunter2"
//! });
//! let output = user.parse(&input.into()).unwrap();
//! assert_eq!(output.get("age"), Some(&Value::Number(36.0)));
//! assert!(!output.contains_key("password"));
//!
//! // Invalid values produce every error, each with its path
//! let errors = user
//!     .parse(&json!({"id": "nope", "email": "ada", "age": -1, "tags": [""]}).into())
//!     .unwrap_err();
//! assert_eq!(errors.len(), 4);
//! assert_eq!(errors.iter().last().unwrap().path.to_string(), "tags[0]");
//! ```

pub mod error;
pub mod path;
pub mod schema;
pub mod validation;
pub mod value;

pub use error::{SchemaBuildError, SchemaError, SchemaErrors};
pub use path::{JsonPath, PathSegment};
pub use schema::{
    AnySchema, ArraySchema, BooleanSchema, ChainSchema, CoerceSchema, Coercion, DateSchema,
    DefaultSchema, EnumSchema, FormatSchema, IntersectionSchema, LiteralSchema, NullableSchema,
    NumberSchema, ObjectSchema, OptionalSchema, RecordSchema, RefineSchema, Schema, SchemaKind,
    SchemaLike, StringSchema, TransformSchema, TryMapSchema, TupleSchema, UnionSchema,
    ValueValidator,
};
pub use validation::ValidationResult;
pub use value::{ObjectMap, Presence, Value, ValueError};
