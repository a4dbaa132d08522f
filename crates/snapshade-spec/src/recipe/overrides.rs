//! `key=value` parameter overrides, the command-line stand-in for sliders.

use serde_json::{Map, Value};

use super::{FilterKind, FilterParams};
use crate::error::SpecError;

/// Split a `key=value` argument.
///
/// Only the first `=` separates; the value may itself contain `=`.
pub fn parse_override(arg: &str) -> Result<(String, String), SpecError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| SpecError::InvalidOverride(arg.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SpecError::InvalidOverride(arg.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(super) fn build_params(
    kind: FilterKind,
    overrides: &[(String, String)],
) -> Result<FilterParams, SpecError> {
    let mut map = Map::new();
    map.insert("kind".to_string(), Value::String(kind.as_str().to_string()));
    for (key, raw) in overrides {
        if key == "kind" {
            return Err(SpecError::InvalidOverride(format!("{}={}", key, raw)));
        }
        map.insert(key.clone(), scalar_value(raw));
    }
    Ok(serde_json::from_value(Value::Object(map))?)
}

// Quoted JSON strings are honored so digit-only density ramps survive.
fn scalar_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::String(_))) => v,
        _ => Value::String(raw.to_string()),
    }
}
