//! Main logger implementation
//!
//! A log call runs through a fixed pipeline: level gate, entry construction
//! (default context merged with call-site context), formatting, filters, then
//! concurrent fan-out to every registered transport. Transport failures are
//! isolated from each other and from the caller.

use super::{
    diagnostics::{panic_to_error, stderr_diagnostics, DiagnosticCallback},
    error::{LoggerError, Result, TransportOperation},
    filter::Filter,
    formatter::{default_formatter, Formatter},
    log_context::LogContext,
    log_entry::{ErrorInfo, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    transport::{same_transport, Transport},
};
use futures::future::join_all;
use futures::FutureExt;
use serde_json::Value;
use std::env::VarError;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Everything a [`Logger`] needs to process entries
///
/// Cloning copies the transport list structurally while the transports,
/// formatter, filters, and diagnostic callback stay shared.
#[derive(Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub transports: Vec<Arc<dyn Transport>>,
    pub default_context: LogContext,
    pub formatter: Formatter,
    pub filters: Vec<Filter>,
    pub on_transport_failure: DiagnosticCallback,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            transports: Vec::new(),
            default_context: LogContext::new(),
            formatter: default_formatter(),
            filters: Vec::new(),
            on_transport_failure: stderr_diagnostics(),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field(
                "transports",
                &self.transports.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("default_context", &self.default_context)
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    /// Shared with child loggers
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn min_level(&self) -> LogLevel {
        self.config.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.config.min_level = level;
    }

    pub fn default_context(&self) -> &LogContext {
        &self.config.default_context
    }

    /// Level gate: true iff `level` is at least the minimum level
    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level.priority() >= self.config.min_level.priority()
    }

    /// Append a transport; affects subsequent dispatches only
    pub fn add_transport(&mut self, transport: Arc<dyn Transport>) {
        self.config.transports.push(transport);
    }

    /// Remove a transport by identity
    ///
    /// Returns `false` and leaves the list untouched when the transport is
    /// not registered.
    pub fn remove_transport<T: Transport + ?Sized>(&mut self, transport: &Arc<T>) -> bool {
        match self
            .config
            .transports
            .iter()
            .position(|registered| same_transport(registered, transport))
        {
            Some(index) => {
                self.config.transports.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn transports(&self) -> &[Arc<dyn Transport>] {
        &self.config.transports
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::Logger;
    ///
    /// let logger = Logger::builder().build();
    ///
    /// let metrics = logger.metrics();
    /// println!("Delivered: {}", metrics.total_logged());
    /// println!("Transport failures: {}", metrics.transport_failures());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Derive a logger with extra default context
    ///
    /// The child gets its own copy of the transport list, so later
    /// registrations on either logger stay local. Transports, formatter,
    /// filters, and metrics are shared with the parent.
    #[must_use]
    pub fn child(&self, extra_context: LogContext) -> Logger {
        let mut config = self.config.clone();
        config.default_context = self.config.default_context.merged(&extra_context);

        Logger {
            config,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Build an entry stamped with the current time
    ///
    /// The entry context is the default context overlaid with `context`;
    /// it is left empty when both are empty.
    pub fn create_entry(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) -> LogEntry {
        let merged = match context {
            Some(ref ctx) => self.config.default_context.merged(ctx),
            None => self.config.default_context.clone(),
        };

        let mut entry = LogEntry::new(level, message);
        if !merged.is_empty() {
            entry = entry.with_context(merged);
        }
        if let Some(error) = error {
            entry = entry.with_error(error);
        }
        entry
    }

    /// Run an entry through the full pipeline
    ///
    /// Resolves once every transport write has settled. Transport failures
    /// are reported on the diagnostic channel and never returned; the only
    /// error is a failing filter.
    pub async fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<LogContext>,
        error: Option<ErrorInfo>,
    ) -> Result<()> {
        if !self.should_log(level) {
            self.metrics.record_gated();
            return Ok(());
        }

        let entry = self.create_entry(level, message, context, error);
        let formatted = entry.with_message((self.config.formatter)(&entry));

        for filter in &self.config.filters {
            if !filter(&formatted)? {
                self.metrics.record_filtered();
                return Ok(());
            }
        }

        self.dispatch(&formatted).await;
        Ok(())
    }

    async fn dispatch(&self, entry: &LogEntry) {
        self.metrics.record_logged();

        let writes = self.config.transports.iter().map(move |transport| {
            guarded(transport.as_ref(), TransportOperation::Write, async move {
                transport.write(entry).await
            })
        });

        for result in join_all(writes).await {
            if let Err(err) = result {
                self.report(&err);
            }
        }
    }

    fn report(&self, err: &LoggerError) {
        self.metrics.record_transport_failure();
        (self.config.on_transport_failure)(err);
    }

    #[inline]
    pub async fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message, None, None).await
    }

    #[inline]
    pub async fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message, None, None).await
    }

    #[inline]
    pub async fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warn, message, None, None).await
    }

    #[inline]
    pub async fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message, None, None).await
    }

    #[inline]
    pub async fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Fatal, message, None, None).await
    }

    /// Log with structured context fields
    pub async fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<()> {
        self.log(level, message, Some(context), None).await
    }

    /// Error-level entry carrying an error value
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let logger = Logger::builder().build();
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "Database error");
    /// logger.error_with("Failed to save", err).await.unwrap();
    /// # });
    /// ```
    pub async fn error_with(
        &self,
        message: impl Into<String>,
        error: impl Into<ErrorInfo>,
    ) -> Result<()> {
        self.log(LogLevel::Error, message, None, Some(error.into())).await
    }

    pub async fn fatal_with(
        &self,
        message: impl Into<String>,
        error: impl Into<ErrorInfo>,
    ) -> Result<()> {
        self.log(LogLevel::Fatal, message, None, Some(error.into())).await
    }

    /// Flush every transport that supports it, concurrently
    ///
    /// All flushes run to completion even if some fail; failures are
    /// reported on the diagnostic channel and returned together.
    pub async fn flush(&self) -> Result<()> {
        self.run_hooks(TransportOperation::Flush).await
    }

    /// Shut down every transport that supports it, concurrently
    ///
    /// Transports without a shutdown hook are skipped. Each failing hook is
    /// reported on the diagnostic channel without stopping its siblings,
    /// then the failures are returned as one [`LoggerError::TransportErrors`].
    /// Logging stays possible afterwards; whether transports accept it is
    /// up to them.
    pub async fn shutdown(&self) -> Result<()> {
        self.run_hooks(TransportOperation::Shutdown).await
    }

    async fn run_hooks(&self, operation: TransportOperation) -> Result<()> {
        let calls = self
            .config
            .transports
            .iter()
            .filter(|transport| transport.capabilities().supports(operation))
            .map(move |transport| {
                guarded(transport.as_ref(), operation, async move {
                    match operation {
                        TransportOperation::Flush => transport.flush().await,
                        _ => transport.shutdown().await,
                    }
                })
            });

        let failures: Vec<LoggerError> = join_all(calls)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        for failure in &failures {
            self.report(failure);
        }
        Err(LoggerError::TransportErrors {
            operation,
            failures,
        })
    }
}

/// Await a transport operation, converting errors and panics into
/// transport-tagged errors
///
/// `call` must defer the actual transport call into its body so a panic
/// raised while creating the transport's future is caught as well.
async fn guarded<F>(transport: &dyn Transport, operation: TransportOperation, call: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(LoggerError::transport_failed(
            transport.name(),
            operation,
            e.to_string(),
        )),
        Err(payload) => Err(panic_to_error(transport.name(), operation, payload)),
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryTransport::new());
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .shared_transport(memory.clone())
///     .context_field("service", "api-gateway")
///     .filter(|entry| !entry.message.contains("healthcheck"))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Read the minimum level from an environment variable
    ///
    /// An unset variable keeps the current level; a value that does not
    /// parse as a [`LogLevel`] is an invalid configuration.
    pub fn min_level_from_env(self, var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) => {
                let level = value
                    .parse::<LogLevel>()
                    .map_err(|message| LoggerError::config(var, message))?;
                Ok(self.min_level(level))
            }
            Err(VarError::NotPresent) => Ok(self),
            Err(VarError::NotUnicode(_)) => {
                Err(LoggerError::config(var, "value is not valid unicode"))
            }
        }
    }

    /// Add a transport owned by this logger
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.config.transports.push(Arc::new(transport));
        self
    }

    /// Add a transport that the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transports.push(transport);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_context(mut self, context: LogContext) -> Self {
        self.config.default_context = context;
        self
    }

    /// Add one field to the default context
    #[must_use = "builder methods return a new value"]
    pub fn context_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.config.default_context.add_field(key, value);
        self
    }

    /// Replace the default formatter
    #[must_use = "builder methods return a new value"]
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&LogEntry) -> String + Send + Sync + 'static,
    {
        self.config.formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_with(mut self, formatter: Formatter) -> Self {
        self.config.formatter = formatter;
        self
    }

    /// Append an infallible filter
    #[must_use = "builder methods return a new value"]
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&LogEntry) -> bool + Send + Sync + 'static,
    {
        self.config.filters.push(super::filter::from_predicate(predicate));
        self
    }

    /// Append a filter whose errors propagate to the caller of `log`
    #[must_use = "builder methods return a new value"]
    pub fn try_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&LogEntry) -> Result<bool> + Send + Sync + 'static,
    {
        self.config.filters.push(Arc::new(predicate));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn filter_with(mut self, filter: Filter) -> Self {
        self.config.filters.push(filter);
        self
    }

    /// Set the diagnostic channel for transport failures
    #[must_use = "builder methods return a new value"]
    pub fn on_transport_failure(mut self, callback: DiagnosticCallback) -> Self {
        self.config.on_transport_failure = callback;
        self
    }

    pub fn build(self) -> Logger {
        Logger::new(self.config)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
