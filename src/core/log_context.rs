//! Structured context attached to log entries
//!
//! A `LogContext` is a string-keyed map of arbitrary JSON values. Loggers
//! carry a default context which is merged with the call-site context of
//! every entry; later sources win on key collision.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Context for structured logging with key-value fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: Map<String, Value>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Shallow merge: fields of `other` override fields of `self`
    #[must_use]
    pub fn merged(&self, other: &LogContext) -> LogContext {
        let mut fields = self.fields.clone();
        for (key, value) in &other.fields {
            fields.insert(key.clone(), value.clone());
        }
        LogContext { fields }
    }

    /// Render the context as a compact JSON object
    pub fn to_json_string(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }
}
