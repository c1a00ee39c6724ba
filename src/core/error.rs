//! Error types for the logger facade

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Transport operation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOperation {
    Write,
    Flush,
    Shutdown,
}

impl fmt::Display for TransportOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportOperation::Write => "write",
            TransportOperation::Flush => "flush",
            TransportOperation::Shutdown => "shutdown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A filter could not evaluate an entry
    #[error("Filter failed: {message}")]
    FilterFailed { message: String },

    /// A transport returned an error
    #[error("Transport '{transport}' {operation} failed: {message}")]
    TransportFailed {
        transport: String,
        operation: TransportOperation,
        message: String,
    },

    /// A transport panicked
    #[error("Transport '{transport}' panicked during {operation}: {message}")]
    TransportPanicked {
        transport: String,
        operation: TransportOperation,
        message: String,
    },

    /// One or more transports failed a flush or shutdown
    #[error("{} transport(s) failed during {operation}", .failures.len())]
    TransportErrors {
        operation: TransportOperation,
        failures: Vec<LoggerError>,
    },

    /// Transport already shut down
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a filter error
    pub fn filter(message: impl Into<String>) -> Self {
        LoggerError::FilterFailed {
            message: message.into(),
        }
    }

    pub fn transport_failed(
        transport: impl Into<String>,
        operation: TransportOperation,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::TransportFailed {
            transport: transport.into(),
            operation,
            message: message.into(),
        }
    }

    pub fn transport_panicked(
        transport: impl Into<String>,
        operation: TransportOperation,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::TransportPanicked {
            transport: transport.into(),
            operation,
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error came from a panicking transport
    #[must_use]
    pub fn is_panic(&self) -> bool {
        matches!(self, LoggerError::TransportPanicked { .. })
    }
}
