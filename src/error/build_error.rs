//! Construction-time errors.

use thiserror::Error;

use crate::schema::SchemaKind;

/// A programmer error detected while building a schema.
///
/// These are never produced while validating input. A constructor that can
/// be misused returns `Result<_, SchemaBuildError>` so the mistake surfaces
/// where the schema is defined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaBuildError {
    /// A literal constant was not a string, number, boolean or null.
    #[error("literal constant must be of type 'string | number | boolean | null', got '{0}'")]
    NonScalarLiteral(&'static str),

    /// A literal constant was NaN, which no input can ever equal.
    #[error("literal constant must not be NaN")]
    NanLiteral,

    /// An enumeration was declared without any members.
    #[error("enumeration must declare at least one value")]
    EmptyEnum,

    /// An enumeration member was not a scalar (or was NaN).
    #[error("enumeration member at position {index} must be a string, number, boolean or null, got '{kind}'")]
    NonScalarEnumMember { index: usize, kind: &'static str },

    /// Coercion was requested for a schema kind that has no conversion.
    #[error("cannot coerce a schema of kind '{0}'")]
    UnsupportedCoercion(SchemaKind),

    /// A string pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
