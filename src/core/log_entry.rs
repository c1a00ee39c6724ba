//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Origin label given to entries built by a [`Logger`](super::Logger)
pub const DEFAULT_SOURCE: &str = "application";

/// Structured description of an error attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    /// Rendered trace; for Rust errors this is the `source()` chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture an error and its chain of sources
    ///
    /// The trace starts with `Error: <message>` followed by one
    /// `    caused by: <source>` line per source in the chain.
    pub fn from_error(err: &dyn StdError) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {}", message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            message,
            stack: Some(stack),
        }
    }

    /// Trace text if present, otherwise the bare message
    pub fn trace(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E: StdError> From<E> for ErrorInfo {
    fn from(err: E) -> Self {
        Self::from_error(&err)
    }
}

/// Immutable snapshot of one logging event
///
/// Entries are values: enrichment such as formatting goes through the
/// consuming builders or [`LogEntry::with_message`], which return a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<LogContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            context: None,
            error: None,
            tags: Vec::new(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Copy of this entry with the message replaced
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self.clone()
        }
    }

    /// Look up a context field
    pub fn context_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.context.as_ref().and_then(|ctx| ctx.get(key))
    }
}
