//! Error types for validation failures and schema construction.
//!
//! Validation failures are data: [`SchemaError`] values collected into a
//! non-empty [`SchemaErrors`]. Mistakes made while *building* a schema are
//! reported through [`SchemaBuildError`] before any input is ever validated.

mod build_error;
mod schema_error;

pub use build_error::SchemaBuildError;
pub use schema_error::{SchemaError, SchemaErrors};
