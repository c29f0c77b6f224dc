//! Dotted-path lookups over `serde_json::Value`
//!
//! Paths look like `data.attributes.mapName` or `data[0].relationships`.
//! Lookups borrow from the document; nothing is cloned.

use super::types::{ExtractError, ExtractResult};
use crate::types::JsonObject;
use serde_json::Value;

/// Resolve a dotted path, returning `None` when any segment is absent
pub(crate) fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        // Handle array indexing like "data[0]"
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index: usize = index_str.parse().ok()?;
            current = current.as_array()?.get(index)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}

/// Resolve a path that must exist
pub(crate) fn require<'a>(value: &'a Value, path: &str) -> ExtractResult<&'a Value> {
    match lookup(value, path) {
        Some(Value::Null) | None => Err(ExtractError::missing_field(path)),
        Some(v) => Ok(v),
    }
}

pub(crate) fn require_str<'a>(value: &'a Value, path: &str) -> ExtractResult<&'a str> {
    require(value, path)?
        .as_str()
        .ok_or_else(|| ExtractError::malformed(path, "string"))
}

pub(crate) fn require_f64(value: &Value, path: &str) -> ExtractResult<f64> {
    require(value, path)?
        .as_f64()
        .ok_or_else(|| ExtractError::malformed(path, "number"))
}

pub(crate) fn require_array<'a>(value: &'a Value, path: &str) -> ExtractResult<&'a [Value]> {
    require(value, path)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ExtractError::malformed(path, "array"))
}

pub(crate) fn require_object<'a>(value: &'a Value, path: &str) -> ExtractResult<&'a JsonObject> {
    require(value, path)?
        .as_object()
        .ok_or_else(|| ExtractError::malformed(path, "object"))
}
