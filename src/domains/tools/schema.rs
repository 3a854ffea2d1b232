//! Tool parameter schemas and validation.
//!
//! Each tool declares its parameters as a closed, explicit description:
//! a list of named fields, each with a primitive kind and a required flag.
//! Validation is a pure function over that description. The same description
//! renders as a JSON Schema object for `tools/list`.

use serde_json::{Map, Value, json};
use thiserror::Error;

/// Primitive kind a parameter field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl FieldKind {
    /// JSON Schema `type` name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// One declared parameter field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

/// Declared parameter shape of a tool.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<FieldSpec>,
}

/// A validation failure, carrying the offending field path and the reason.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid arguments: '{path}' {reason}")]
pub struct ValidationError {
    pub path: String,
    pub reason: String,
}

impl ValidationError {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl ToolSchema {
    /// A schema with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Shorthand for a required string field.
    pub fn required_string(self, name: &'static str, description: &'static str) -> Self {
        self.field(FieldSpec {
            name,
            kind: FieldKind::String,
            required: true,
            description,
        })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate raw arguments against this schema.
    ///
    /// Checks that the input is an object, that every required field is
    /// present, and that each present declared field has its declared kind.
    /// Kind checking only: an empty string is a valid string. On success
    /// returns the arguments narrowed to the declared fields.
    pub fn validate(&self, raw: &Value) -> Result<Map<String, Value>, ValidationError> {
        let empty = Map::new();
        let object = match raw {
            Value::Object(map) => map,
            // Absent params arrive as null; treat as an empty object so
            // zero-parameter tools accept them.
            Value::Null => &empty,
            other => {
                return Err(ValidationError::new(
                    "<root>",
                    format!("expected an object, got {}", json_type_name(other)),
                ));
            }
        };

        let mut validated = Map::new();
        for spec in &self.fields {
            match object.get(spec.name) {
                Some(value) => {
                    if !spec.kind.matches(value) {
                        return Err(ValidationError::new(
                            spec.name,
                            format!(
                                "expected {}, got {}",
                                spec.kind.type_name(),
                                json_type_name(value)
                            ),
                        ));
                    }
                    validated.insert(spec.name.to_string(), value.clone());
                }
                None if spec.required => {
                    return Err(ValidationError::new(spec.name, "is required"));
                }
                None => {}
            }
        }
        Ok(validated)
    }

    /// Render the declared shape as a JSON Schema object (`inputSchema` in
    /// `tools/list`).
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in &self.fields {
            properties.insert(
                spec.name.to_string(),
                json!({
                    "type": spec.kind.type_name(),
                    "description": spec.description,
                }),
            );
            if spec.required {
                required.push(Value::String(spec.name.to_string()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
