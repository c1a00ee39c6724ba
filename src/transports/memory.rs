//! In-memory transport
//!
//! Keeps every delivered entry in a buffer. Useful for tests and for
//! inspecting what a logger emitted.

use crate::core::{LogEntry, LoggerError, Result, Transport, TransportCapabilities};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct MemoryTransport {
    name: String,
    entries: Mutex<Vec<LogEntry>>,
    flushes: AtomicU64,
    shut_down: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Snapshot of all captured entries, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn write(&self, entry: &LogEntry) -> Result<()> {
        if self.is_shut_down() {
            return Err(LoggerError::LoggerStopped);
        }
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        self.shut_down.store(true, Ordering::Release);
        Ok(())
    }

    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::WRITE_ONLY.with_flush().with_shutdown()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
