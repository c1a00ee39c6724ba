//! Diagnostic channel for failures the logger swallows
//!
//! Transport failures never reach the caller of `log`. They are handed to a
//! [`DiagnosticCallback`] instead, which by default prints to stderr.

use super::error::{LoggerError, TransportOperation};
use std::any::Any;
use std::sync::Arc;

/// Callback receiving every caught transport failure
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .on_transport_failure(Arc::new(|err: &LoggerError| {
///         eprintln!("ALERT: {}", err);
///     }))
///     .build();
/// ```
pub type DiagnosticCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Default callback: one line on stderr per failure
pub fn stderr_diagnostics() -> DiagnosticCallback {
    Arc::new(|err: &LoggerError| {
        if err.is_panic() {
            eprintln!(
                "[LOGGER CRITICAL] {}. Other transports continue to function.",
                err
            );
        } else {
            eprintln!("[LOGGER ERROR] {}", err);
        }
    })
}

/// Callback that discards failures
pub fn silent_diagnostics() -> DiagnosticCallback {
    Arc::new(|_: &LoggerError| {})
}

/// Convert a caught panic payload into a transport error
pub(crate) fn panic_to_error(
    transport: &str,
    operation: TransportOperation,
    payload: Box<dyn Any + Send>,
) -> LoggerError {
    let panic_msg = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    LoggerError::transport_panicked(transport, operation, panic_msg)
}
