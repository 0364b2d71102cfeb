//! The result algebra every schema returns.
//!
//! A validation either succeeds with a value or fails with a non-empty
//! [`SchemaErrors`]. The type is stillwater's [`Validation`]; this module adds
//! the handful of combinators the schemas are written in terms of.
//!
//! ```rust
//! use gatekeep::validation::{and_then, fold, success};
//! use gatekeep::ValidationResult;
//!
//! let doubled: ValidationResult<i32> = and_then(success(21), |n| success(n * 2));
//! let rendered = fold(doubled, |errors| errors.to_string(), |n| n.to_string());
//! assert_eq!(rendered, "42");
//! ```

use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = Validation<T, SchemaErrors>;

/// Wraps a value in a successful result.
pub fn success<T>(value: T) -> ValidationResult<T> {
    Validation::Success(value)
}

/// Wraps a single error in a failed result.
pub fn failure<T>(error: SchemaError) -> ValidationResult<T> {
    Validation::Failure(SchemaErrors::single(error))
}

/// Succeeds with `value` when `errors` is empty, otherwise fails with all of them.
///
/// Structural schemas build their output and collect child errors side by
/// side, then settle the outcome here. A partially built value is never
/// returned alongside errors.
pub fn from_parts<T>(value: T, errors: Vec<SchemaError>) -> ValidationResult<T> {
    match SchemaErrors::from_vec(errors) {
        None => Validation::Success(value),
        Some(errors) => Validation::Failure(errors),
    }
}

/// Applies `f` to a successful value; failures short-circuit unchanged.
pub fn and_then<T, U, F>(result: ValidationResult<T>, f: F) -> ValidationResult<U>
where
    F: FnOnce(T) -> ValidationResult<U>,
{
    match result {
        Validation::Success(value) => f(value),
        Validation::Failure(errors) => Validation::Failure(errors),
    }
}

/// Consumes a result by handling both variants.
pub fn fold<T, R>(
    result: ValidationResult<T>,
    on_failure: impl FnOnce(SchemaErrors) -> R,
    on_success: impl FnOnce(T) -> R,
) -> R {
    match result {
        Validation::Success(value) => on_success(value),
        Validation::Failure(errors) => on_failure(errors),
    }
}
