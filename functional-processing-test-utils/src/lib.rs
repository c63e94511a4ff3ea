//! Test utilities for functional processing crates
//!
//! Shared fixtures for pipeline tests:
//!
//! - [`RecordingSink`] - a [`LogSink`] that keeps every record it receives
//! - [`TestRequest`] - a request type that carries nothing but a name
//! - [`CountingHandler`] - a terminal handler that counts its invocations
//!
//! ## Usage
//!
//! ```no_run
//! use functional_processing::LogLevel;
//! use functional_processing_logging::LoggingPipeline;
//! use functional_processing_test_utils::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let decorator = LoggingPipeline::new(sink.clone());
//! // ... run a pipeline ...
//! assert_eq!(sink.count_at(LogLevel::Error), 0);
//! ```

use async_trait::async_trait;
use functional_processing::LogLevel;
use functional_processing_logging::{LogSink, RequestHandler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A single record captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Log sink that stores records in memory
///
/// Clones share the same storage, so a test can keep one handle while the
/// pipeline owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, in emission order
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of records emitted at `level`
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.lock().iter().filter(|r| r.level == level).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }

    // A panicking test thread must not hide the records from the others
    fn lock(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for RecordingSink {
    fn trace(&self, message: &str) {
        self.record(LogLevel::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn information(&self, message: &str) {
        self.record(LogLevel::Information, message);
    }

    fn warning(&self, message: &str) {
        self.record(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }

    fn critical(&self, message: &str) {
        self.record(LogLevel::Critical, message);
    }
}

/// Request type for pipeline tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRequest {
    pub name: String,
}

impl TestRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Terminal handler that returns a fresh response per call and counts calls
pub struct CountingHandler<F> {
    respond: F,
    calls: Arc<AtomicUsize>,
}

impl<F> CountingHandler<F> {
    /// Handler answering every request with `respond()`
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter, usable after the handler moved into a pipeline
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<Req, Res, F> RequestHandler<Req, Res> for CountingHandler<F>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
    F: Fn() -> Res + Send + Sync,
{
    async fn handle(&self, _request: &Req) -> Res {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)()
    }
}
