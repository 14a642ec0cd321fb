//! Tolerant decoding for columns whose shape depends on where the row came from.
//!
//! Local documents always hold proper JSON arrays and numbers. Rows from a
//! remote table may carry list columns as Postgres array literals, JSON text
//! or comma-separated strings, and numeric columns as strings. These helpers
//! accept all of those so the entity types stay strict.

use crate::models::LossType;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Best-effort conversion of a column value into a list of strings.
///
/// Accepts a JSON array (non-string items dropped), a Postgres array literal
/// `{a,b,"c"}`, a JSON array encoded as text, or a comma-separated string.
/// Anything else is an empty list.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => strings_of(items),
        Value::String(s) => parse_list_text(s),
        _ => Vec::new(),
    }
}

fn strings_of(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn parse_list_text(s: &str) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Some(inner) = trimmed.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
        return inner
            .split(',')
            .map(|part| part.trim().trim_matches('"').to_string())
            .filter(|part| !part.is_empty())
            .collect();
    }

    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return strings_of(&items);
        }
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best-effort numeric column: number, numeric string, or null/blank.
/// A string that does not parse as a number is an error.
pub fn number(value: &Value) -> Result<Option<f64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| format!("invalid number {s:?}: {e}")),
        other => Err(format!("expected a number, got {other}")),
    }
}

// ---- serde adapters ------------------------------------------------------------

pub(crate) fn de_loss_types<'de, D>(d: D) -> Result<Vec<LossType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(d)?;
    string_list(&raw)
        .into_iter()
        .map(|s| s.parse::<LossType>().map_err(D::Error::custom))
        .collect()
}

pub(crate) fn de_opt_string_list<'de, D>(d: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(d)?;
    match raw {
        Value::Null => Ok(None),
        other => Ok(Some(string_list(&other))),
    }
}

pub(crate) fn de_opt_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(d)?;
    number(&raw).map_err(D::Error::custom)
}
