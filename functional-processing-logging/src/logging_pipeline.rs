//! Pipeline behavior that logs failed results exactly once
//!
//! Any number of [`LoggingPipeline`]s may sit in the same chain. The first one
//! to observe an unlogged failure on the way out claims it through
//! [`ExecutionError::mark_logged`](functional_processing::ExecutionError::mark_logged)
//! and emits a single record; every later observer sees the flag and passes
//! the result through untouched.

use crate::config::LoggingConfig;
use crate::pipeline::{Next, PipelineBehavior};
use crate::sink::{emit, LogSink, TracingSink};
use async_trait::async_trait;
use functional_processing::{LogLevel, Outcome};
use tracing::trace;

/// Logging decorator for pipeline responses
#[derive(Debug, Clone)]
pub struct LoggingPipeline<S = TracingSink> {
    sink: S,
    minimum_level: LogLevel,
}

impl LoggingPipeline<TracingSink> {
    /// Decorator logging through `tracing`, categorized by the request type
    pub fn for_request<Req: ?Sized>() -> Self {
        Self::new(TracingSink::for_request::<Req>())
    }
}

impl<S: LogSink> LoggingPipeline<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            minimum_level: LogLevel::Trace,
        }
    }

    /// Decorator configured from a [`LoggingConfig`]
    pub fn from_config(sink: S, config: &LoggingConfig) -> Self {
        Self::new(sink).with_minimum_level(config.minimum_level)
    }

    /// Skip failures below `minimum_level`
    ///
    /// Skipped failures are not marked as logged, so an outer decorator with
    /// a lower threshold can still report them.
    pub fn with_minimum_level(mut self, minimum_level: LogLevel) -> Self {
        self.minimum_level = minimum_level;
        self
    }

    pub fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Log `outcome` if it is an unlogged failure at an enabled level
    ///
    /// Returns `true` when this call emitted the record. Succeeded results,
    /// failures without an error, `None`-level and already-logged failures
    /// are left alone.
    pub fn observe<O: Outcome + ?Sized>(&self, outcome: &O) -> bool {
        if outcome.succeeded() {
            return false;
        }

        let Some(error) = outcome.error() else {
            trace!("Failed result carries no error, nothing to log");
            return false;
        };

        let level = error.log_level();
        if !level.is_enabled() || level < self.minimum_level {
            trace!(%level, minimum = %self.minimum_level, "Failure below logging threshold");
            return false;
        }

        if !error.mark_logged() {
            trace!("Failure already logged by another stage");
            return false;
        }

        emit(&self.sink, level, &error.message());
        true
    }
}

impl Default for LoggingPipeline<TracingSink> {
    fn default() -> Self {
        Self::new(TracingSink::default())
    }
}

#[async_trait]
impl<Req, Res, S> PipelineBehavior<Req, Res> for LoggingPipeline<S>
where
    Req: Send + Sync + 'static,
    Res: Outcome + Send + 'static,
    S: LogSink,
{
    async fn handle(&self, request: &Req, next: Next<'_, Req, Res>) -> Res {
        let response = next.run(request).await;
        self.observe(&response);
        response
    }
}
