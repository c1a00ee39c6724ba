//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and return the
//! logger's completion future, which must be awaited.
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::info;
//!
//! # tokio_test::block_on(async {
//! let logger = Logger::builder().build();
//!
//! // Basic logging
//! info!(logger, "Server started").await.unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port).await.unwrap();
//! # });
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # tokio_test::block_on(async {
/// # let logger = Logger::builder().build();
/// use rust_logger_facade::log;
/// log!(logger, LogLevel::Info, "Simple message").await.unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).await.unwrap();
/// # });
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), None, None)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// # tokio_test::block_on(async {
/// # let logger = Logger::builder().build();
/// use rust_logger_facade::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").await.unwrap();
/// # });
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
