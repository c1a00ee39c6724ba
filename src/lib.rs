//! # Rust Logger Facade
//!
//! A structured logging facade: leveled log calls are enriched with
//! contextual metadata, formatted, filtered, and fanned out concurrently to
//! pluggable transports.
//!
//! ## Features
//!
//! - **Level gate**: entries below the minimum level are never built
//! - **Structured context**: default context merged with call-site context
//! - **Isolated transports**: one failing sink never breaks the others
//! - **Child loggers**: derived loggers with extra default context
//!
//! ## Example
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let memory = Arc::new(MemoryTransport::new());
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Warn)
//!     .shared_transport(memory.clone())
//!     .build();
//!
//! logger.debug("ignored").await.unwrap();
//! let child = logger.child(LogContext::new().with_field("userId", "123"));
//! child.error("Failed to save").await.unwrap();
//!
//! assert_eq!(memory.len(), 1);
//! logger.shutdown().await.unwrap();
//! # });
//! ```

pub mod core;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        DiagnosticCallback, ErrorInfo, Filter, Formatter, LogContext, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sampler,
        TimestampFormat, Transport, TransportCapabilities, TransportOperation,
    };
    #[cfg(feature = "console")]
    pub use crate::transports::ConsoleTransport;
    pub use crate::transports::MemoryTransport;
}

pub use crate::core::{
    DiagnosticCallback, ErrorInfo, Filter, Formatter, LogContext, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sampler, TimestampFormat,
    Transport, TransportCapabilities, TransportOperation,
};
#[cfg(feature = "console")]
pub use transports::ConsoleTransport;
pub use transports::MemoryTransport;
