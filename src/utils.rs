//! Helpers for pulling typed arguments out of loosely-typed JSON.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::{from_value, Value};

use crate::error::ValidationError;

/// Deserialize a tool's `arguments` object into its parameter struct.
///
/// Models occasionally send the arguments as a JSON-encoded string; that form
/// is accepted too.
pub fn parse_arguments<T: DeserializeOwned>(args: Value) -> Result<T, ValidationError> {
    let args = match args {
        Value::String(raw) => serde_json::from_str(&raw)
            .map_err(|e| ValidationError::InvalidArguments(format!("arguments are not JSON: {}", e)))?,
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    from_value(args).map_err(|e| ValidationError::InvalidArguments(e.to_string()))
}

/// Accept an amount given either as a string (`"1.5"`) or a bare JSON number (`1.5`).
pub fn amount_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "amount must be a string or number, got {}",
            other
        ))),
    }
}
