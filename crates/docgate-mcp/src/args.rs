//! Typed access to a request's named string arguments.

use serde_json::{Map, Value};

use crate::error::OperationError;

/// Arguments of one operation request.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    pub const fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build from the `arguments` member of a call; `null` means no arguments.
    pub fn from_value(value: Option<Value>) -> Result<Self, OperationError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(_) => Err(OperationError::validation("Tool arguments must be an object")),
        }
    }

    /// A required, non-blank string argument.
    pub fn required_str(&self, name: &str) -> Result<&str, OperationError> {
        match self.0.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            Some(Value::String(_)) | None | Some(Value::Null) => Err(OperationError::validation(
                format!("Missing required argument: {name}"),
            )),
            Some(_) => Err(OperationError::validation(format!(
                "Argument '{name}' must be a string"
            ))),
        }
    }

    /// An optional string argument; blank strings count as absent.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, OperationError> {
        match self.0.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
            Some(Value::String(_) | Value::Null) | None => Ok(None),
            Some(_) => Err(OperationError::validation(format!(
                "Argument '{name}' must be a string"
            ))),
        }
    }

    /// An optional string argument with a default.
    pub fn str_or<'a>(&'a self, name: &str, default: &'a str) -> Result<&'a str, OperationError> {
        Ok(self.optional_str(name)?.unwrap_or(default))
    }
}

impl From<Map<String, Value>> for ToolArgs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
