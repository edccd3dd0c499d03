//! Data models for example invocations.
//!
//! Parameter sets go into collaborators, payloads come back out. A decoded
//! payload is exposed as a [`Document`]: an untyped view whose accessors
//! substitute defaults instead of failing when a key is absent.

use crate::error::PayloadError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Placeholder printed for values the collaborator did not return.
pub const MISSING: &str = "N/A";

/// Named parameters passed to a collaborator.
///
/// Keys keep insertion order so dry runs print them the way they were written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Render as pretty-printed JSON (2-space indent).
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Result returned by a collaborator: JSON text, or an already-decoded mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Decoded(Map<String, Value>),
}

impl Payload {
    /// Decode into a [`Document`].
    ///
    /// Both forms yield the same document for the same content.
    pub fn decode(&self) -> Result<Document, PayloadError> {
        match self {
            Payload::Decoded(map) => Ok(Document(map.clone())),
            Payload::Text(text) => match serde_json::from_str::<Value>(text.trim())? {
                Value::Object(map) => Ok(Document(map)),
                other => Err(PayloadError::NotAnObject(json_kind(&other))),
            },
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Decoded(map)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => write!(f, "{}", text),
            Payload::Decoded(map) => {
                let pretty = serde_json::to_string_pretty(map).map_err(|_| fmt::Error)?;
                write!(f, "{}", pretty)
            }
        }
    }
}

/// Untyped, best-effort view over a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn empty() -> Self {
        Self::default()
    }

    /// View any JSON value as a document; non-objects become empty.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            _ => Self::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Nested object under `key`, or an empty document.
    pub fn section(&self, key: &str) -> Document {
        self.0.get(key).map(Self::from_value).unwrap_or_default()
    }

    /// Array under `key`, or an empty slice.
    pub fn list(&self, key: &str) -> &[Value] {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Scalar under `key` rendered for display.
    ///
    /// Strings print without quotes; null and absent values yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(n)),
            other => Some(other.to_string()),
        }
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    /// First present key among `keys`, else `default`.
    pub fn first_text_or(&self, keys: &[&str], default: &str) -> String {
        keys.iter()
            .find_map(|k| self.text(k))
            .unwrap_or_else(|| default.to_string())
    }

    /// Numeric value under `key`; numeric strings are accepted too.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// String items of the array under `key`; other items are skipped.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.list(key)
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Pretty-printed JSON (2-space indent); `{}` when empty.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Render a JSON number without a trailing `.0` for whole floats.
pub fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Render an amount: whole values without decimals, others to two places.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Render a list item for display: strings raw, everything else as JSON.
pub fn display_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
