//! Logger metrics for observability
//!
//! Counters for entries delivered, dropped by the level gate or by filters,
//! and transport failures that were caught and reported.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_logger_facade::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_transport_failure();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.transport_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries that reached fan-out
    total_logged: AtomicU64,

    /// Entries below the minimum level
    gated_count: AtomicU64,

    /// Entries rejected by a filter
    filtered_count: AtomicU64,

    /// Caught write, flush, or shutdown failures
    transport_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            gated_count: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn gated_count(&self) -> u64 {
        self.gated_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_failures(&self) -> u64 {
        self.transport_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_gated(&self) -> u64 {
        self.gated_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_transport_failure(&self) -> u64 {
        self.transport_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failures per delivered entry, as a percentage
    ///
    /// Returns 0.0 if nothing has been delivered. Can exceed 100.0 when
    /// several transports fail on the same entry.
    pub fn failure_rate(&self) -> f64 {
        let logged = self.total_logged() as f64;
        if logged == 0.0 {
            0.0
        } else {
            (self.transport_failures() as f64 / logged) * 100.0
        }
    }

    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.gated_count.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.transport_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            gated_count: AtomicU64::new(self.gated_count()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            transport_failures: AtomicU64::new(self.transport_failures()),
        }
    }
}
