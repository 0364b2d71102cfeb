//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating key-value maps with
//! typed fields, optional fields, default values, and a policy for keys the
//! schema does not declare.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{failure, from_parts, ValidationResult};
use crate::value::{ObjectMap, Value};

use super::modifiers::{DefaultSchema, OptionalSchema};
use super::traits::{SchemaKind, SchemaLike, ValueValidator};

/// How to handle properties not defined in the schema.
enum AdditionalProperties {
    /// Drop unknown properties from the output (default behavior).
    Strip,
    /// Copy unknown properties to the output unchanged.
    Allow,
    /// Reject unknown properties.
    Deny,
    /// Validate unknown properties against a schema.
    Validate(Box<dyn ValueValidator>),
}

/// A schema for validating objects with a fixed set of named fields.
///
/// Every declared field is validated, in declaration order, against the
/// input's value for that key. A key missing from the input is validated as
/// [`Value::Undefined`], so only fields whose schema accepts absence (see
/// [`optional_field`](ObjectSchema::optional_field) and
/// [`default_field`](ObjectSchema::default_field)) may be left out. All field
/// errors are accumulated, each under its field's path.
///
/// The output is a fresh map holding the declared fields only; keys the
/// schema does not declare are dropped unless
/// [`additional_properties`](ObjectSchema::additional_properties) says otherwise.
///
/// # Example
///
/// ```rust
/// use gatekeep::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::number().positive())
///     .optional_field("email", Schema::email());
///
/// let user = schema
///     .parse(&json!({"name": "Alice", "age": 30, "admin": true}).into())
///     .unwrap();
/// assert_eq!(user.get("name"), Some(&Value::from("Alice")));
/// assert!(!user.contains_key("admin"));
/// assert!(!user.contains_key("email"));
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, Box<dyn ValueValidator>>,
    additional_properties: AdditionalProperties,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            additional_properties: AdditionalProperties::Strip,
            type_error_message: None,
        }
    }

    /// Adds a field validated by `schema`.
    ///
    /// Redeclaring a name replaces the earlier schema but keeps its position.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
        S::Output: Into<Value>,
    {
        self.fields.insert(name.into(), Box::new(schema));
        self
    }

    /// Adds a field that may be absent from the input.
    ///
    /// Equivalent to `.field(name, schema.optional())`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object().optional_field("nickname", Schema::string());
    ///
    /// assert!(schema.parse(&json!({}).into()).is_ok());
    /// assert!(schema.parse(&json!({"nickname": null}).into()).is_err());
    /// ```
    pub fn optional_field<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
        S::Output: Into<Value>,
    {
        self.field(name, OptionalSchema::new(schema))
    }

    /// Adds a field that takes `fallback` when absent from the input.
    ///
    /// Equivalent to `.field(name, schema.with_default(fallback))`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object().default_field("role", Schema::string(), "user".to_string());
    ///
    /// let output = schema.parse(&json!({}).into()).unwrap();
    /// assert_eq!(output.get("role"), Some(&Value::from("user")));
    /// ```
    pub fn default_field<S>(self, name: impl Into<String>, schema: S, fallback: S::Output) -> Self
    where
        S: SchemaLike + 'static,
        S::Output: Into<Value> + Clone + Send + Sync + 'static,
    {
        self.field(name, DefaultSchema::new(schema, fallback))
    }

    /// Configures how properties the schema does not declare are handled.
    ///
    /// By default they are stripped from the output. `true` copies them
    /// through unchanged, `false` reports each as an `additional_property`
    /// error, and a schema validates each of them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let strict = Schema::object()
    ///     .field("name", Schema::string())
    ///     .additional_properties(false);
    /// assert!(strict.parse(&json!({"name": "Alice", "extra": 1}).into()).is_err());
    ///
    /// let tags = Schema::object()
    ///     .field("name", Schema::string())
    ///     .additional_properties(Schema::string());
    /// let output = tags.parse(&json!({"name": "Alice", "team": "core"}).into()).unwrap();
    /// assert!(output.contains_key("team"));
    /// ```
    pub fn additional_properties<S>(mut self, setting: S) -> Self
    where
        S: Into<AdditionalPropertiesSetting>,
    {
        self.additional_properties = setting.into().0;
        self
    }

    /// Sets the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Keeps only the named fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gatekeep::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let user = Schema::object()
    ///     .field("id", Schema::number())
    ///     .field("name", Schema::string())
    ///     .field("password", Schema::string());
    ///
    /// let public = user.pick(&["id", "name"]);
    /// assert_eq!(public.field_names().collect::<Vec<_>>(), vec!["id", "name"]);
    /// assert!(public.parse(&json!({"id": 1, "name": "Ann"}).into()).is_ok());
    /// ```
    pub fn pick(mut self, names: &[&str]) -> Self {
        self.fields.retain(|name, _| names.contains(&name.as_str()));
        self
    }

    /// Drops the named fields.
    pub fn omit(mut self, names: &[&str]) -> Self {
        self.fields.retain(|name, _| !names.contains(&name.as_str()));
        self
    }

    /// Adds every field of `other`, replacing same-named fields of `self`.
    ///
    /// The unknown-key policy and type error message of `self` are kept.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Returns the declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn check_unknown(
        &self,
        key: &str,
        value: &Value,
        path: &JsonPath,
        validated: &mut ObjectMap,
        errors: &mut Vec<SchemaError>,
    ) {
        match &self.additional_properties {
            AdditionalProperties::Strip => {}
            AdditionalProperties::Allow => {
                validated.insert(key.to_string(), value.clone());
            }
            AdditionalProperties::Deny => {
                errors.push(
                    SchemaError::new(path.push_field(key), format!("Unexpected key '{}'.", key))
                        .with_code("additional_property")
                        .with_got(value.kind_name()),
                );
            }
            AdditionalProperties::Validate(schema) => {
                match schema.validate_value(value, &path.push_field(key)) {
                    Validation::Success(v) => {
                        validated.insert(key.to_string(), v);
                    }
                    Validation::Failure(e) => errors.extend(e),
                }
            }
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = ObjectMap;

    fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult<ObjectMap> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return failure(SchemaError::invalid_type(
                    path,
                    "object",
                    value,
                    self.type_error_message.as_ref(),
                ))
            }
        };

        let mut errors = Vec::new();
        let mut validated = ObjectMap::new();

        for (name, schema) in &self.fields {
            let field_value = value.get(name);
            match schema.validate_value(field_value, &path.push_field(name)) {
                Validation::Success(Value::Undefined) => {}
                Validation::Success(v) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        for (key, field_value) in obj {
            if !self.fields.contains_key(key) {
                self.check_unknown(key, field_value, path, &mut validated, &mut errors);
            }
        }

        from_parts(validated, errors)
    }

    fn kind(&self) -> SchemaKind {
        SchemaKind::Object
    }
}

/// A type that can be converted into an unknown-key policy.
///
/// This allows `additional_properties()` to accept different types:
/// - `bool`: `true` to pass unknown keys through, `false` to reject them
/// - Any schema type: validate each unknown value against the schema
pub struct AdditionalPropertiesSetting(AdditionalProperties);

impl From<bool> for AdditionalPropertiesSetting {
    fn from(allow: bool) -> Self {
        if allow {
            AdditionalPropertiesSetting(AdditionalProperties::Allow)
        } else {
            AdditionalPropertiesSetting(AdditionalProperties::Deny)
        }
    }
}

impl<S> From<S> for AdditionalPropertiesSetting
where
    S: SchemaLike + 'static,
    S::Output: Into<Value>,
{
    fn from(schema: S) -> Self {
        AdditionalPropertiesSetting(AdditionalProperties::Validate(Box::new(schema)))
    }
}
