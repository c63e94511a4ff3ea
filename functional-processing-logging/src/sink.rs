//! Log sinks: the "level → emission call" contract
//!
//! A [`LogSink`] exposes one emission call per level. [`emit`] is the single
//! routing point from a [`LogLevel`] to that call.

use functional_processing::LogLevel;

/// Destination for failure log records
pub trait LogSink: Send + Sync {
    fn trace(&self, message: &str);
    fn debug(&self, message: &str);
    fn information(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn critical(&self, message: &str);
}

/// Route `message` to the sink call matching `level`
///
/// [`LogLevel::None`] and any level without a sink call are ignored.
pub fn emit<S: LogSink + ?Sized>(sink: &S, level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace => sink.trace(message),
        LogLevel::Debug => sink.debug(message),
        LogLevel::Information => sink.information(message),
        LogLevel::Warning => sink.warning(message),
        LogLevel::Error => sink.error(message),
        LogLevel::Critical => sink.critical(message),
        _ => {}
    }
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn trace(&self, message: &str) {
        (**self).trace(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn information(&self, message: &str) {
        (**self).information(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn critical(&self, message: &str) {
        (**self).critical(message)
    }
}

/// Sink that forwards to `tracing`
///
/// Every event carries a `category` field naming the request type the
/// failure came from. `tracing` has no critical level, so critical records
/// are emitted at `ERROR` with `critical = true`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    category: String,
}

impl TracingSink {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    /// Sink categorized by the request type name
    pub fn for_request<Req: ?Sized>() -> Self {
        Self::new(std::any::type_name::<Req>())
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new("functional_processing")
    }
}

impl LogSink for TracingSink {
    fn trace(&self, message: &str) {
        tracing::trace!(category = %self.category, "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(category = %self.category, "{}", message);
    }

    fn information(&self, message: &str) {
        tracing::info!(category = %self.category, "{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!(category = %self.category, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(category = %self.category, "{}", message);
    }

    fn critical(&self, message: &str) {
        tracing::error!(category = %self.category, critical = true, "{}", message);
    }
}
