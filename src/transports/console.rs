//! Console transport implementation

use crate::core::{LogEntry, LogLevel, Result, TimestampFormat, Transport, TransportCapabilities};
use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;

/// Channel an entry is routed to, one per severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleStream {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => ConsoleStream::Debug,
            LogLevel::Info => ConsoleStream::Info,
            LogLevel::Warn => ConsoleStream::Warn,
            LogLevel::Error | LogLevel::Fatal => ConsoleStream::Error,
        }
    }

    /// Debug and info go to stdout, everything else to stderr
    pub fn is_stderr(&self) -> bool {
        matches!(self, ConsoleStream::Warn | ConsoleStream::Error)
    }
}

/// Writes each entry as `[<timestamp>] <LEVEL>: <message>` to stdout or stderr
///
/// The transport lays out its own prefix, so it prints `entry.message` as the
/// formatter left it. Under the default formatter the message already holds a
/// rendered `[ts] LEVEL:` line and the prefix appears twice. Pair it with
/// [`message_formatter`](crate::core::message_formatter) for a single prefix:
///
/// ```
/// use rust_logger_facade::core::message_formatter;
/// use rust_logger_facade::prelude::*;
///
/// let logger = Logger::builder()
///     .formatter_with(message_formatter())
///     .transport(ConsoleTransport::new())
///     .build();
/// ```
pub struct ConsoleTransport {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this transport
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_facade::transports::ConsoleTransport;
    /// use rust_logger_facade::TimestampFormat;
    ///
    /// let transport = ConsoleTransport::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render `[<timestamp>] <LEVEL>: <message>` plus context and, for
    /// error and fatal entries, the attached error
    pub fn render(&self, entry: &LogEntry) -> String {
        let level_str = if self.use_colors {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        };

        let mut line = format!(
            "[{}] {}: {}",
            self.timestamp_format.format(&entry.timestamp),
            level_str,
            entry.message
        );

        if let Some(ref context) = entry.context {
            if !context.is_empty() {
                line.push(' ');
                line.push_str(&context.format_fields());
            }
        }

        if entry.level >= LogLevel::Error {
            if let Some(ref error) = entry.error {
                line.push_str(" error=");
                line.push_str(&error.message);
            }
        }

        line
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn write(&self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry);

        if ConsoleStream::for_level(entry.level).is_stderr() {
            writeln!(std::io::stderr().lock(), "{}", output)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", output)?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::WRITE_ONLY.with_flush()
    }

    fn name(&self) -> &str {
        "console"
    }
}
