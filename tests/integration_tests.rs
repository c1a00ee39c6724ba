//! Integration tests for the logger facade
//!
//! These tests verify:
//! - Level gating
//! - Context merging and child loggers
//! - Filter suppression
//! - Transport failure isolation
//! - Transport registry mutation
//! - Concurrent dispatch and shutdown semantics

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_logger_facade::core::diagnostics::silent_diagnostics;
use rust_logger_facade::prelude::*;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

/// Transport that fails every write, either by error or by panicking
struct FailingTransport {
    panic_on_write: bool,
    attempts: AtomicUsize,
}

impl FailingTransport {
    fn erroring() -> Self {
        Self {
            panic_on_write: false,
            attempts: AtomicUsize::new(0),
        }
    }

    fn panicking() -> Self {
        Self {
            panic_on_write: true,
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transport for FailingTransport {
    async fn write(&self, _entry: &LogEntry) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if self.panic_on_write {
            panic!("sink exploded");
        }
        Err(LoggerError::other("Simulated failure"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Transport with a shutdown hook that can be told to fail
struct HookedTransport {
    fail_shutdown: bool,
    shutdowns: AtomicUsize,
}

impl HookedTransport {
    fn new(fail_shutdown: bool) -> Self {
        Self {
            fail_shutdown,
            shutdowns: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transport for HookedTransport {
    async fn write(&self, _entry: &LogEntry) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.shutdowns.fetch_add(1, Ordering::Relaxed);
        if self.fail_shutdown {
            return Err(LoggerError::other("socket already closed"));
        }
        Ok(())
    }

    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::WRITE_ONLY.with_shutdown()
    }

    fn name(&self) -> &str {
        "hooked"
    }
}

/// Transport that panics as soon as `write` is called, before any future exists
struct EagerPanicTransport;

impl Transport for EagerPanicTransport {
    fn write<'life0, 'life1, 'async_trait>(
        &'life0 self,
        _entry: &'life1 LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        panic!("refused before producing a future");
    }

    fn name(&self) -> &str {
        "eager-panic"
    }
}

/// Transport whose write and shutdown both wait on a shared barrier
///
/// With two of these registered, either call completes only if the logger
/// drives both transports at the same time.
struct RendezvousTransport {
    barrier: Arc<Barrier>,
}

#[async_trait]
impl Transport for RendezvousTransport {
    async fn write(&self, _entry: &LogEntry) -> Result<()> {
        self.barrier.wait().await;
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        self.barrier.wait().await;
        Ok(())
    }

    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::WRITE_ONLY.with_shutdown()
    }

    fn name(&self) -> &str {
        "rendezvous"
    }
}

fn collecting_diagnostics() -> (DiagnosticCallback, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: DiagnosticCallback = Arc::new(move |err: &LoggerError| {
        sink.lock().push(err.to_string());
    });
    (callback, seen)
}

#[tokio::test]
async fn test_min_level_warn_scenario() {
    let first = Arc::new(MemoryTransport::new());
    let second = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .min_level(LogLevel::Warn)
        .shared_transport(first.clone())
        .shared_transport(second.clone())
        .build();

    logger.debug("x").await.unwrap();
    assert!(first.is_empty());
    assert!(second.is_empty());

    let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    logger.error_with("y", err).await.unwrap();

    for transport in [&first, &second] {
        let entries = transport.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[0].error.as_ref().unwrap().message, "boom");
    }
}

#[tokio::test]
async fn test_exactly_one_write_per_transport_per_call() {
    let transports: Vec<Arc<MemoryTransport>> =
        (0..3).map(|_| Arc::new(MemoryTransport::new())).collect();
    let mut logger = Logger::builder().min_level(LogLevel::Debug).build();
    for transport in &transports {
        logger.add_transport(transport.clone());
    }

    for level in LogLevel::ALL {
        logger.log(level, "event", None, None).await.unwrap();
    }

    for transport in &transports {
        assert_eq!(transport.len(), LogLevel::ALL.len());
    }
    assert_eq!(logger.metrics().total_logged(), 5);
}

#[tokio::test]
async fn test_call_site_context_wins() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(memory.clone())
        .context_field("env", "prod")
        .context_field("requestId", "default")
        .build();

    let ctx = LogContext::new().with_field("requestId", "abc-123");
    logger
        .log_with_context(LogLevel::Info, "handled", ctx)
        .await
        .unwrap();

    let entry = &memory.entries()[0];
    assert_eq!(entry.context_value("env"), Some(&json!("prod")));
    assert_eq!(entry.context_value("requestId"), Some(&json!("abc-123")));
}

#[tokio::test]
async fn test_rejecting_filter_suppresses_all_transports() {
    let first = Arc::new(MemoryTransport::new());
    let second = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(first.clone())
        .shared_transport(second.clone())
        .filter_with(rust_logger_facade::core::filter::exclude_containing("secret"))
        .build();

    logger.info("the secret is 42").await.unwrap();
    logger.info("nothing to hide").await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert!(first.messages()[0].contains("nothing to hide"));
}

#[tokio::test]
async fn test_filters_run_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let (a, b) = (Arc::clone(&order), Arc::clone(&order));
    let logger = Logger::builder()
        .transport(MemoryTransport::new())
        .filter(move |_| {
            a.lock().push("first");
            true
        })
        .filter(move |_| {
            b.lock().push("second");
            true
        })
        .build();

    logger.info("one").await.unwrap();
    logger.info("two").await.unwrap();

    assert_eq!(*order.lock(), vec!["first", "second", "first", "second"]);
}

#[tokio::test]
async fn test_failing_transport_does_not_block_siblings() {
    let failing = Arc::new(FailingTransport::erroring());
    let healthy = Arc::new(MemoryTransport::new());
    let (diagnostics, seen) = collecting_diagnostics();
    let logger = Logger::builder()
        .shared_transport(failing.clone())
        .shared_transport(healthy.clone())
        .on_transport_failure(diagnostics)
        .build();

    for _ in 0..5 {
        logger.info("Test message").await.unwrap();
    }

    assert_eq!(healthy.len(), 5);
    assert_eq!(failing.attempts.load(Ordering::Relaxed), 5);
    assert_eq!(logger.metrics().transport_failures(), 5);
    assert_eq!(seen.lock().len(), 5);
    assert_eq!(
        seen.lock()[0],
        "Transport 'failing' write failed: Simulated failure"
    );
}

#[tokio::test]
async fn test_panicking_transport_is_isolated() {
    let healthy = Arc::new(MemoryTransport::new());
    let (diagnostics, seen) = collecting_diagnostics();
    let logger = Logger::builder()
        .transport(FailingTransport::panicking())
        .shared_transport(healthy.clone())
        .on_transport_failure(diagnostics)
        .build();

    let result = logger.warn("still delivered").await;

    assert!(result.is_ok());
    assert_eq!(healthy.len(), 1);
    assert!(seen.lock()[0].contains("panicked during write: sink exploded"));
}

#[tokio::test]
async fn test_panic_while_creating_write_future_is_isolated() {
    let healthy = Arc::new(MemoryTransport::new());
    let (diagnostics, seen) = collecting_diagnostics();
    let logger = Logger::builder()
        .transport(EagerPanicTransport)
        .shared_transport(healthy.clone())
        .on_transport_failure(diagnostics)
        .build();

    let result = logger.info("delivered anyway").await;

    assert!(result.is_ok());
    assert_eq!(healthy.len(), 1);
    assert_eq!(logger.metrics().transport_failures(), 1);
    assert!(seen.lock()[0].contains("'eager-panic' panicked during write"));
}

#[tokio::test]
async fn test_writes_and_shutdowns_run_concurrently() {
    let barrier = Arc::new(Barrier::new(2));
    let logger = Logger::builder()
        .transport(RendezvousTransport {
            barrier: Arc::clone(&barrier),
        })
        .transport(RendezvousTransport {
            barrier: Arc::clone(&barrier),
        })
        .build();

    tokio::time::timeout(Duration::from_secs(2), logger.info("x"))
        .await
        .expect("writes were not dispatched concurrently")
        .unwrap();

    tokio::time::timeout(Duration::from_secs(2), logger.shutdown())
        .await
        .expect("shutdown hooks were not run concurrently")
        .unwrap();
}

#[tokio::test]
async fn test_child_context_scenario() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(memory.clone())
        .context_field("service", "billing")
        .build();

    let child = logger.child(LogContext::new().with_field("userId", "123"));
    let cause = std::io::Error::new(std::io::ErrorKind::Other, "Database error");
    child.error_with("Failed to save", cause).await.unwrap();
    logger.error("parent entry").await.unwrap();

    let entries = memory.entries();
    assert_eq!(entries.len(), 2);

    let from_child = &entries[0];
    assert_eq!(from_child.context_value("userId"), Some(&json!("123")));
    assert_eq!(from_child.context_value("service"), Some(&json!("billing")));
    assert!(from_child.message.contains("Failed to save"));
    assert!(from_child.message.contains("Database error"));

    let from_parent = &entries[1];
    assert_eq!(from_parent.context_value("userId"), None);
    assert_eq!(from_parent.context_value("service"), Some(&json!("billing")));
}

#[tokio::test]
async fn test_child_registry_is_independent() {
    let shared = Arc::new(MemoryTransport::new());
    let mut parent = Logger::builder().shared_transport(shared.clone()).build();
    let mut child = parent.child(LogContext::new());

    let child_only = Arc::new(MemoryTransport::new());
    child.add_transport(child_only.clone());
    assert!(parent.remove_transport(&shared));

    parent.info("parent").await.unwrap();
    child.info("child").await.unwrap();

    assert_eq!(shared.len(), 1);
    assert_eq!(child_only.len(), 1);
    assert!(shared.messages()[0].ends_with("child"));
    assert_eq!(child.metrics().total_logged(), 2);
}

#[tokio::test]
async fn test_add_transport_is_not_retroactive() {
    let early = Arc::new(MemoryTransport::new());
    let late = Arc::new(MemoryTransport::new());
    let mut logger = Logger::builder().shared_transport(early.clone()).build();

    logger.info("before").await.unwrap();
    logger.add_transport(late.clone());
    logger.info("after").await.unwrap();

    assert_eq!(early.len(), 2);
    assert_eq!(late.len(), 1);
}

#[tokio::test]
async fn test_remove_unregistered_transport() {
    let registered = Arc::new(MemoryTransport::new());
    let mut logger = Logger::builder().shared_transport(registered.clone()).build();

    let lookalike = Arc::new(MemoryTransport::new());
    assert!(!logger.remove_transport(&lookalike));
    assert_eq!(logger.transports().len(), 1);

    assert!(logger.remove_transport(&registered));
    assert!(!logger.remove_transport(&registered));
    assert!(logger.transports().is_empty());
}

#[tokio::test]
async fn test_shutdown_runs_all_hooks_and_reports_failures() {
    let good = Arc::new(HookedTransport::new(false));
    let bad = Arc::new(HookedTransport::new(true));
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(bad.clone())
        .shared_transport(good.clone())
        .shared_transport(memory.clone())
        .transport(FailingTransport::erroring())
        .on_transport_failure(silent_diagnostics())
        .build();

    let result = logger.shutdown().await;

    assert_eq!(good.shutdowns.load(Ordering::Relaxed), 1);
    assert_eq!(bad.shutdowns.load(Ordering::Relaxed), 1);
    assert!(memory.is_shut_down());
    match result {
        Err(LoggerError::TransportErrors {
            operation,
            failures,
        }) => {
            assert_eq!(operation, TransportOperation::Shutdown);
            assert_eq!(failures.len(), 1);
        }
        other => panic!("expected aggregated shutdown error, got {:?}", other),
    }
    assert_eq!(logger.metrics().transport_failures(), 1);
}

#[tokio::test]
async fn test_logging_after_shutdown_is_safe() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(memory.clone())
        .on_transport_failure(silent_diagnostics())
        .build();

    logger.info("before").await.unwrap();
    logger.shutdown().await.unwrap();
    logger.info("after").await.unwrap();

    assert_eq!(memory.len(), 1);
    assert_eq!(logger.metrics().transport_failures(), 1);
}

#[tokio::test]
async fn test_flush_only_reaches_capable_transports() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(memory.clone())
        .transport(HookedTransport::new(false))
        .build();

    logger.flush().await.unwrap();
    logger.flush().await.unwrap();

    assert_eq!(memory.flush_count(), 2);
}

#[tokio::test]
async fn test_json_formatter_output() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .shared_transport(memory.clone())
        .formatter_with(rust_logger_facade::core::json_formatter())
        .context_field("node", 7)
        .build();

    logger.info("started").await.unwrap();

    let rendered: serde_json::Value = serde_json::from_str(&memory.messages()[0]).unwrap();
    assert_eq!(rendered["message"], "started");
    assert_eq!(rendered["level"], "info");
    assert_eq!(rendered["context"]["node"], 7);
}

#[tokio::test]
async fn test_min_level_from_env() {
    std::env::set_var("FACADE_TEST_LOG_LEVEL", "error");
    let logger = Logger::builder()
        .min_level_from_env("FACADE_TEST_LOG_LEVEL")
        .unwrap()
        .build();
    assert_eq!(logger.min_level(), LogLevel::Error);

    std::env::set_var("FACADE_TEST_BAD_LEVEL", "loud");
    let result = Logger::builder().min_level_from_env("FACADE_TEST_BAD_LEVEL");
    assert!(matches!(
        result,
        Err(LoggerError::InvalidConfiguration { .. })
    ));

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .min_level_from_env("FACADE_TEST_UNSET_LEVEL")
        .unwrap()
        .build();
    assert_eq!(logger.min_level(), LogLevel::Debug);
}

#[tokio::test]
async fn test_concurrent_logging() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Arc::new(
        Logger::builder()
            .shared_transport(memory.clone())
            .build(),
    );

    let mut handles = Vec::new();
    for task_id in 0..5 {
        let logger = Arc::clone(&logger);
        handles.push(tokio::spawn(async move {
            for i in 0..10 {
                logger
                    .info(format!("Task {} - Message {}", task_id, i))
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(memory.len(), 50);
}
