//! Typed access to untyped tool arguments.
//!
//! Tool calls arrive as a JSON object. Handlers pull each parameter out
//! with [`required`] or [`optional`], which check the JSON type and turn
//! mismatches into a [`ParamError`] the caller gets back as a tool error.
//! `null` is treated the same as an absent key.

use miette::Diagnostic;
use rmcp::model::JsonObject;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing required parameter: {name}")]
    #[diagnostic(code(todoist_mcp::mcp::missing_param))]
    Missing { name: String },

    #[error("parameter {name} must be {expected}")]
    #[diagnostic(code(todoist_mcp::mcp::wrong_type))]
    WrongType { name: String, expected: &'static str },

    #[error("invalid parameter {name}: {reason}")]
    #[diagnostic(code(todoist_mcp::mcp::invalid_param))]
    Invalid { name: String, reason: String },

    #[error("no fields to update: set at least one of {fields}")]
    #[diagnostic(code(todoist_mcp::mcp::no_changes))]
    NoChanges { fields: &'static str },
}

impl ParamError {
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ParamError::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// A Rust type that can be read out of a JSON argument.
pub trait ParamValue: Sized {
    /// Human description of the accepted JSON type, used in errors.
    const EXPECTED: &'static str;

    fn from_json(value: &Value) -> Option<Self>;

    /// Whether a present value still counts as missing for a required
    /// parameter.
    fn is_blank(&self) -> bool {
        false
    }
}

impl ParamValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl ParamValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_json(value: &Value) -> Option<Self> {
        // Some clients send every number as a float
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }
}

impl ParamValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ParamValue for Vec<String> {
    const EXPECTED: &'static str = "an array of strings";

    fn from_json(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }
}

/// Read a parameter that must be present, non-null and (for strings)
/// non-empty.
pub fn required<T: ParamValue>(args: &JsonObject, name: &str) -> Result<T, ParamError> {
    match optional::<T>(args, name)? {
        Some(value) if !value.is_blank() => Ok(value),
        _ => Err(ParamError::Missing {
            name: name.to_string(),
        }),
    }
}

/// Read a parameter that may be absent or null.
pub fn optional<T: ParamValue>(args: &JsonObject, name: &str) -> Result<Option<T>, ParamError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::from_json(value)
            .map(Some)
            .ok_or_else(|| ParamError::WrongType {
                name: name.to_string(),
                expected: T::EXPECTED,
            }),
    }
}
