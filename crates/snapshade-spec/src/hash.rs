//! Canonical hashing and seed derivation.
//!
//! - Recipe canonicalization using RFC 8785 (JCS)
//! - BLAKE3 hashing for recipe hashes
//! - Seed derivation for batch inputs

use crate::error::SpecError;
use crate::recipe::FilterRecipe;

/// Computes the canonical BLAKE3 hash of a recipe.
///
/// ```text
/// recipe_hash = hex(BLAKE3(JCS(recipe_json)))
/// ```
///
/// Two recipes that differ only in key order or whitespace hash the same.
pub fn canonical_recipe_hash(recipe: &FilterRecipe) -> Result<String, SpecError> {
    let value = recipe.to_value()?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3_hash(canonical.as_bytes()))
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// This produces a deterministic JSON string where:
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Numbers are formatted per IEEE 754
/// - Strings use minimal escaping
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    Ok(canonicalize_value(value))
}

fn canonicalize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_value).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_value(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') && !s.contains('E') {
                return s.trim_end_matches('0').trim_end_matches('.').to_string();
            }
            s
        }
        _ => "null".to_string(),
    }
}

fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

/// Derives a seed for one input of a batch from the recipe seed.
///
/// ```text
/// input_seed = truncate_u32(BLAKE3(base_seed || input_name))
/// ```
///
/// Each file in a batch gets its own grain pattern while reruns stay
/// byte-identical.
///
/// # Example
/// ```
/// use snapshade_spec::hash::derive_input_seed;
///
/// let a = derive_input_seed(7, "beach.jpg");
/// let b = derive_input_seed(7, "forest.jpg");
/// assert_ne!(a, b);
/// assert_eq!(a, derive_input_seed(7, "beach.jpg"));
/// ```
pub fn derive_input_seed(base_seed: u32, input_name: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + input_name.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(input_name.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Computes a BLAKE3 hash of arbitrary data as lowercase hex.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
