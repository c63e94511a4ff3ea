//! Error types for functional processing
//!
//! This module holds the failure payload carried by a failed
//! [`ExecutionResult`](crate::ExecutionResult), plus the two error types that
//! live outside result-space: [`ExecutionException`] for the edge where a
//! result is converted back into a `std::result::Result`, and [`AccessError`]
//! for programmer errors on the checked accessors.

use crate::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error as ThisError;

/// Separator used when joining messages into [`ExecutionError::message`]
pub const MESSAGE_SEPARATOR: &str = "; ";

/// Structured failure payload
///
/// Messages keep insertion order. The error code is a caller-defined
/// classification and is independent of the messages.
///
/// The `logged` flag is the once-only gate used by the logging pipeline: it
/// starts `false` and moves to `true` at most once through
/// [`mark_logged`](Self::mark_logged). The transition is a compare-and-set,
/// so concurrent observers of the same instance still log exactly once.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExecutionError {
    messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_code: Option<i32>,
    #[serde(default)]
    log_level: LogLevel,
    #[serde(skip)]
    logged: AtomicBool,
}

impl ExecutionError {
    /// Create an error from an ordered list of messages
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            error_code: None,
            log_level: LogLevel::default(),
            logged: AtomicBool::new(false),
        }
    }

    /// Set the caller-defined error code
    pub fn with_error_code(mut self, error_code: i32) -> Self {
        self.error_code = Some(error_code);
        self
    }

    /// Set the level the logging pipeline reports this error at
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// All messages joined with `"; "`
    pub fn message(&self) -> String {
        self.messages.join(MESSAGE_SEPARATOR)
    }

    pub fn error_code(&self) -> Option<i32> {
        self.error_code
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Whether a pipeline stage has already logged this instance
    pub fn is_logged(&self) -> bool {
        self.logged.load(Ordering::Acquire)
    }

    /// Flip `logged` from `false` to `true`
    ///
    /// Returns `true` only for the caller that performed the transition.
    /// Every later call returns `false`; the flag is never reset.
    pub fn mark_logged(&self) -> bool {
        self.logged
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn set_error_code(&mut self, error_code: i32) {
        self.error_code = Some(error_code);
    }

    pub(crate) fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }
}

impl Clone for ExecutionError {
    fn clone(&self) -> Self {
        Self {
            messages: self.messages.clone(),
            error_code: self.error_code,
            log_level: self.log_level,
            logged: AtomicBool::new(self.is_logged()),
        }
    }
}

// `logged` is bookkeeping, not identity
impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
            && self.error_code == other.error_code
            && self.log_level == other.log_level
    }
}

impl Eq for ExecutionError {}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<&str> for ExecutionError {
    fn from(message: &str) -> Self {
        Self::new([message])
    }
}

impl From<String> for ExecutionError {
    fn from(message: String) -> Self {
        Self::new([message])
    }
}

impl From<Vec<String>> for ExecutionError {
    fn from(messages: Vec<String>) -> Self {
        Self::new(messages)
    }
}

impl From<Vec<&str>> for ExecutionError {
    fn from(messages: Vec<&str>) -> Self {
        Self::new(messages)
    }
}

impl<const N: usize> From<[&str; N]> for ExecutionError {
    fn from(messages: [&str; N]) -> Self {
        Self::new(messages)
    }
}

/// Error produced when a failed result is converted back into a
/// `std::result::Result` at a system edge
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ExecutionException {
    message: String,
}

impl ExecutionException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Programmer errors raised by the checked accessors
///
/// These are never returned; they are the panic payload text for a call site
/// that read the wrong side of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum AccessError {
    /// `checked_value` on a failed result
    #[error("MissingValueAccess: attempted to read the value of a failed execution result")]
    MissingValueAccess,

    /// `checked_error` on a succeeded result
    #[error("MissingErrorAccess: attempted to read the error of a succeeded execution result")]
    MissingErrorAccess,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_joins_with_separator() {
        let error = ExecutionError::new(["first", "second", "third"]);
        assert_eq!(error.message(), "first; second; third");
        assert_eq!(error.to_string(), "first; second; third");
    }

    #[test]
    fn test_empty_messages_join_to_empty_string() {
        let error = ExecutionError::new(Vec::<String>::new());
        assert!(error.messages().is_empty());
        assert_eq!(error.message(), "");
    }

    #[test]
    fn test_defaults() {
        let error = ExecutionError::from("boom");
        assert_eq!(error.error_code(), None);
        assert_eq!(error.log_level(), LogLevel::Error);
        assert!(!error.is_logged());
    }

    #[test]
    fn test_mark_logged_transitions_once() {
        let error = ExecutionError::from("boom");
        assert!(error.mark_logged());
        assert!(error.is_logged());
        assert!(!error.mark_logged());
        assert!(error.is_logged());
    }

    #[test]
    fn test_mark_logged_once_across_threads() {
        let error = std::sync::Arc::new(ExecutionError::from("boom"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let error = error.clone();
                std::thread::spawn(move || error.mark_logged())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn test_clone_keeps_flag_and_equality_ignores_it() {
        let error = ExecutionError::from("boom").with_error_code(7);
        let fresh = error.clone();
        error.mark_logged();
        let copied = error.clone();

        assert!(copied.is_logged());
        assert!(!fresh.is_logged());
        assert_eq!(fresh, error);
    }

    #[test]
    fn test_serialization_skips_logged_flag() {
        let error = ExecutionError::new(["a", "b"])
            .with_error_code(404)
            .with_log_level(LogLevel::Warning);
        error.mark_logged();

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": ["a", "b"],
                "error_code": 404,
                "log_level": "warning"
            })
        );

        let restored: ExecutionError = serde_json::from_value(json).unwrap();
        assert_eq!(restored, error);
        assert!(!restored.is_logged());
    }

    #[test]
    fn test_access_error_text_names_the_violation() {
        assert!(AccessError::MissingValueAccess
            .to_string()
            .starts_with("MissingValueAccess"));
        assert!(AccessError::MissingErrorAccess
            .to_string()
            .starts_with("MissingErrorAccess"));
    }
}
