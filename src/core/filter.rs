//! Entry filters
//!
//! Filters are evaluated in order against the formatted entry. An entry is
//! delivered only when every filter returns `Ok(true)`; an `Err` is a
//! configuration error and is returned to the caller of `log`.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Fallible predicate over a formatted entry
pub type Filter = Arc<dyn Fn(&LogEntry) -> Result<bool> + Send + Sync>;

/// Wrap an infallible predicate
pub fn from_predicate<F>(predicate: F) -> Filter
where
    F: Fn(&LogEntry) -> bool + Send + Sync + 'static,
{
    Arc::new(move |entry: &LogEntry| -> Result<bool> { Ok(predicate(entry)) })
}

/// Reject entries whose rendered message contains `needle`
pub fn exclude_containing(needle: impl Into<String>) -> Filter {
    let needle = needle.into();
    from_predicate(move |entry| !entry.message.contains(&needle))
}

/// Probabilistic sampling of low-severity entries
///
/// Entries at or above `always_keep` always pass. Everything else passes
/// with probability `rate`.
///
/// # Example
///
/// ```
/// use rust_logger_facade::core::filter::Sampler;
/// use rust_logger_facade::{LogLevel, Logger};
/// use std::sync::Arc;
///
/// let sampler = Arc::new(Sampler::new(0.1).unwrap().always_keep_at(LogLevel::Warn));
/// let logger = Logger::builder().filter_with(sampler.into_filter()).build();
/// ```
#[derive(Debug)]
pub struct Sampler {
    rate: f64,
    always_keep: LogLevel,
    kept: AtomicU64,
    dropped: AtomicU64,
}

impl Sampler {
    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(LoggerError::config(
                "Sampler",
                format!("sample rate must be within 0.0..=1.0, got {}", rate),
            ));
        }

        Ok(Self {
            rate,
            always_keep: LogLevel::Error,
            kept: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn always_keep_at(mut self, level: LogLevel) -> Self {
        self.always_keep = level;
        self
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn should_keep(&self, entry: &LogEntry) -> bool {
        let keep = entry.level >= self.always_keep || rand::thread_rng().gen::<f64>() < self.rate;

        if keep {
            self.kept.fetch_add(1, Ordering::Relaxed);
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        keep
    }

    pub fn kept_count(&self) -> u64 {
        self.kept.load(Ordering::Relaxed)
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Turn a shared sampler into a filter; counters stay readable
    pub fn into_filter(self: Arc<Self>) -> Filter {
        Arc::new(move |entry: &LogEntry| -> Result<bool> { Ok(self.should_keep(entry)) })
    }
}
