//! Core logger types and traits

pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod transport;

pub use diagnostics::{silent_diagnostics, stderr_diagnostics, DiagnosticCallback};
pub use error::{LoggerError, Result, TransportOperation};
pub use filter::{Filter, Sampler};
pub use formatter::{
    default_formatter, format_default, json_formatter, message_formatter, Formatter,
};
pub use log_context::LogContext;
pub use log_entry::{ErrorInfo, LogEntry, DEFAULT_SOURCE};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerConfig};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
pub use transport::{same_transport, Transport, TransportCapabilities};
