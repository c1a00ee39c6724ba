//! Transport trait for log output destinations

use super::{
    error::{Result, TransportOperation},
    log_entry::LogEntry,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Optional operations a transport supports beyond `write`
///
/// The logger only calls `flush` or `shutdown` on transports that
/// advertise the matching capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportCapabilities {
    pub flush: bool,
    pub shutdown: bool,
}

impl TransportCapabilities {
    pub const WRITE_ONLY: Self = Self {
        flush: false,
        shutdown: false,
    };

    #[must_use]
    pub const fn with_flush(mut self) -> Self {
        self.flush = true;
        self
    }

    #[must_use]
    pub const fn with_shutdown(mut self) -> Self {
        self.shutdown = true;
        self
    }

    /// Whether the logger may invoke `operation` on the transport
    pub const fn supports(&self, operation: TransportOperation) -> bool {
        match operation {
            TransportOperation::Write => true,
            TransportOperation::Flush => self.flush,
            TransportOperation::Shutdown => self.shutdown,
        }
    }
}

/// Sink receiving formatted log entries
///
/// Transports are shared between loggers through `Arc`, so every operation
/// takes `&self`; use interior mutability for buffered state.
///
/// # Example
///
/// ```
/// use rust_logger_facade::core::{LogEntry, Result, Transport};
/// use async_trait::async_trait;
///
/// struct StdoutTransport;
///
/// #[async_trait]
/// impl Transport for StdoutTransport {
///     async fn write(&self, entry: &LogEntry) -> Result<()> {
///         println!("{}", entry.message);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "stdout"
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one formatted entry
    async fn write(&self, entry: &LogEntry) -> Result<()>;

    /// Drain buffered output
    ///
    /// # Capability pairing
    ///
    /// The logger calls this only when [`Transport::capabilities`] includes
    /// `flush`. Overriding it without also returning
    /// `TransportCapabilities::with_flush()` leaves the hook unreachable.
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Release resources
    ///
    /// # Capability pairing
    ///
    /// The logger calls this only when [`Transport::capabilities`] includes
    /// `shutdown`. Overriding it without also returning
    /// `TransportCapabilities::with_shutdown()` leaves the hook unreachable.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Optional hooks the logger may invoke
    ///
    /// Must list every hook this transport overrides; the default is
    /// write-only.
    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::WRITE_ONLY
    }

    fn name(&self) -> &str;
}

/// Identity comparison of two transport handles
///
/// Compares allocation addresses only, so two transports with identical
/// behavior are still distinct. Works across `Arc<dyn Transport>` and
/// concrete `Arc<T>` handles.
#[inline]
pub fn same_transport<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
