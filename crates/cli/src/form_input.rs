//! `--arg NAME=VALUE` parsing into form values.

use codec::{FormValue, FormValues};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormInputError {
    #[error("Argument '{0}' must look like NAME=VALUE")]
    MissingSeparator(String),

    #[error("Argument name cannot be empty in '{0}'")]
    EmptyName(String),

    #[error("Argument '{0}' was given more than once")]
    Duplicate(String),

    #[error("Invalid JSON for argument '{name}': {reason}")]
    InvalidJson { name: String, reason: String },
}

/// Parse one `NAME=VALUE` pair.
///
/// Values starting with `{`, `[` or `"` are read as JSON, so composite arguments
/// can be given inline. Everything else is kept as the text a form field would
/// hold, and left to coercion.
pub fn parse_arg(raw: &str) -> Result<(String, FormValue), FormInputError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| FormInputError::MissingSeparator(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(FormInputError::EmptyName(raw.to_string()));
    }

    let value = if value.starts_with(['{', '[', '"']) {
        let json: serde_json::Value =
            serde_json::from_str(value).map_err(|e| FormInputError::InvalidJson {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        FormValue::from_json(&json)
    } else {
        FormValue::Str(value.to_string())
    };

    Ok((name.to_string(), value))
}

pub fn parse_args(raw: &[String]) -> Result<FormValues, FormInputError> {
    let mut values = FormValues::new();
    for arg in raw {
        let (name, value) = parse_arg(arg)?;
        if values.insert(name.clone(), value).is_some() {
            return Err(FormInputError::Duplicate(name));
        }
    }
    Ok(values)
}
