//! Entry formatters
//!
//! A logger has exactly one active formatter. Its output replaces the
//! message of the entry that filters and transports observe.

use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::Serialize;
use std::sync::Arc;

/// Function rendering an entry into its display string
pub type Formatter = Arc<dyn Fn(&LogEntry) -> String + Send + Sync>;

/// Canonical line: `[<ISO-8601>] <LEVEL>: <message> [<context json>] [<trace>]`
///
/// The context is appended only when present and non-empty, the error's
/// trace only when an error is attached.
pub fn format_default(entry: &LogEntry) -> String {
    let mut line = format!(
        "[{}] {}: {}",
        TimestampFormat::Iso8601.format(&entry.timestamp),
        entry.level.to_str(),
        entry.message
    );

    if let Some(ref context) = entry.context {
        if !context.is_empty() {
            line.push(' ');
            line.push_str(&context.to_json_string());
        }
    }

    if let Some(ref error) = entry.error {
        line.push(' ');
        line.push_str(error.trace());
    }

    line
}

pub fn default_formatter() -> Formatter {
    Arc::new(format_default)
}

/// Leaves the message untouched
///
/// For transports that render their own line layout, such as
/// `ConsoleTransport`.
pub fn message_formatter() -> Formatter {
    Arc::new(|entry: &LogEntry| entry.message.clone())
}

/// Renders the whole entry as one JSON object
///
/// Falls back to the canonical line if the entry cannot be serialized.
pub fn json_formatter() -> Formatter {
    Arc::new(|entry: &LogEntry| json_or_else(entry, || format_default(entry)))
}

fn json_or_else<T: Serialize>(value: &T, fallback: impl FnOnce() -> String) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback())
}
