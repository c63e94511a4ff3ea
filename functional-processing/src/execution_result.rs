//! Execution result types
//!
//! [`ExecutionResult<T>`] is the value-bearing form; [`VoidResult`] is the
//! same type specialized to `()`. Both implement [`Outcome`], the capability
//! the logging pipeline and [`combine`](crate::combine) work against.

use crate::error::{AccessError, ExecutionError, ExecutionException};
use crate::LogLevel;
use std::fmt;

/// Body of an [`ExecutionException`] for a failed result that carries no error
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Result of executing a handler
///
/// Exactly one of value/error is present for a well-formed result. A
/// value-bearing result with neither is the "no value" state: it models a
/// handler that never produced its value and is treated as failed, even
/// though it carries no error. [`no_value`](Self::no_value) and
/// [`from_option(None)`](Self::from_option) produce this state.
///
/// The void form ([`VoidResult`]) has no such state: its `()` payload is
/// always present, so a void result without an error is a success. Its
/// [`Default`] is [`success_void`](crate::success_void).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult<T = ()> {
    value: Option<T>,
    error: Option<ExecutionError>,
}

/// Signal-only result with no payload
pub type VoidResult = ExecutionResult<()>;

impl<T> ExecutionResult<T> {
    /// Successful result holding `value`
    pub const fn success(value: T) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    /// Failed result holding `error`
    pub fn failure(error: impl Into<ExecutionError>) -> Self {
        Self {
            value: None,
            error: Some(error.into()),
        }
    }

    /// The "no value" failed state of a value-bearing result
    ///
    /// Zero-sized payloads are rejected at compile time: a void result has
    /// no value to be missing.
    pub const fn no_value() -> Self {
        const {
            assert!(
                std::mem::size_of::<T>() != 0,
                "the void form has no \"no value\" state"
            )
        };
        Self {
            value: None,
            error: None,
        }
    }

    /// Successful result for `Some`, the "no value" failed state for `None`
    ///
    /// Value-bearing payloads only, as for [`no_value`](Self::no_value).
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::success(value),
            None => Self::no_value(),
        }
    }

    /// Set the error code on a failure; a success is returned unchanged
    pub fn with_error_code(mut self, error_code: i32) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.set_error_code(error_code);
        }
        self
    }

    /// Set the log level on a failure; a success is returned unchanged
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.set_log_level(log_level);
        }
        self
    }

    pub fn value(&self) -> Option<&T> {
        if self.succeeded() {
            self.value.as_ref()
        } else {
            None
        }
    }

    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.value.is_some()
    }

    pub fn failed(&self) -> bool {
        !self.succeeded()
    }

    /// The value of a succeeded result
    ///
    /// # Panics
    ///
    /// Panics with [`AccessError::MissingValueAccess`] if the result failed.
    pub fn checked_value(&self) -> &T {
        match self.value() {
            Some(value) => value,
            None => panic!("{}", AccessError::MissingValueAccess),
        }
    }

    /// Owned variant of [`checked_value`](Self::checked_value)
    ///
    /// # Panics
    ///
    /// Panics with [`AccessError::MissingValueAccess`] if the result failed.
    pub fn into_checked_value(self) -> T {
        match (self.error, self.value) {
            (None, Some(value)) => value,
            _ => panic!("{}", AccessError::MissingValueAccess),
        }
    }

    /// The error of a failed result
    ///
    /// # Panics
    ///
    /// Panics with [`AccessError::MissingErrorAccess`] if the result carries no error.
    pub fn checked_error(&self) -> &ExecutionError {
        match self.error.as_ref() {
            Some(error) => error,
            None => panic!("{}", AccessError::MissingErrorAccess),
        }
    }

    /// Convert into the `std::result::Result` error channel
    ///
    /// Intended for system edges. The exception message is
    /// `"{prefix}: {error message}"`, or just the error message without a
    /// prefix.
    pub fn throw_if_failed(self, prefix: Option<&str>) -> Result<T, ExecutionException> {
        self.ensure_succeeded(prefix)?;
        Ok(self.into_checked_value())
    }

    /// Convert into a plain `Result`, keeping the structured error
    ///
    /// The "no value" state maps to an [`ExecutionError`] carrying
    /// [`UNKNOWN_ERROR`].
    pub fn into_result(self) -> Result<T, ExecutionError> {
        match (self.error, self.value) {
            (Some(error), _) => Err(error),
            (None, Some(value)) => Ok(value),
            (None, None) => Err(ExecutionError::from(UNKNOWN_ERROR)),
        }
    }
}

impl Default for VoidResult {
    fn default() -> Self {
        Self::success(())
    }
}

impl<T> fmt::Display for ExecutionResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            _ if self.succeeded() => f.write_str("ExecutionSucceeded"),
            Some(error) => write!(f, "ExecutionFailed: {error}"),
            None => write!(f, "ExecutionFailed: {UNKNOWN_ERROR}"),
        }
    }
}

/// Success/failure capability shared by every result shape
///
/// Object safe, so results with different payload types can be handled
/// together as `&dyn Outcome`.
pub trait Outcome {
    /// The error, present iff the execution failed with a structured error
    fn error(&self) -> Option<&ExecutionError>;

    fn succeeded(&self) -> bool;

    fn failed(&self) -> bool {
        !self.succeeded()
    }

    /// # Panics
    ///
    /// Panics with [`AccessError::MissingErrorAccess`] if no error is present.
    fn checked_error(&self) -> &ExecutionError {
        match self.error() {
            Some(error) => error,
            None => panic!("{}", AccessError::MissingErrorAccess),
        }
    }

    /// Void form of `throw_if_failed`
    fn ensure_succeeded(&self, prefix: Option<&str>) -> Result<(), ExecutionException> {
        if !self.failed() {
            return Ok(());
        }

        let body = self
            .error()
            .map(ExecutionError::message)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());

        Err(match prefix {
            Some(prefix) => ExecutionException::new(format!("{prefix}: {body}")),
            None => ExecutionException::new(body),
        })
    }

    /// Drop any payload, keeping a copy of the error
    ///
    /// The void form fails only through its error, so a value-bearing
    /// "no value" result reduces to a success.
    fn reduce(&self) -> VoidResult {
        match self.error() {
            Some(error) => VoidResult::failure(error.clone()),
            None => VoidResult::success(()),
        }
    }
}

impl<T> Outcome for ExecutionResult<T> {
    fn error(&self) -> Option<&ExecutionError> {
        ExecutionResult::error(self)
    }

    fn succeeded(&self) -> bool {
        ExecutionResult::succeeded(self)
    }
}

impl<O: Outcome + ?Sized> Outcome for &O {
    fn error(&self) -> Option<&ExecutionError> {
        (**self).error()
    }

    fn succeeded(&self) -> bool {
        (**self).succeeded()
    }
}

impl<O: Outcome + ?Sized> Outcome for Box<O> {
    fn error(&self) -> Option<&ExecutionError> {
        (**self).error()
    }

    fn succeeded(&self) -> bool {
        (**self).succeeded()
    }
}

impl<O: Outcome + ?Sized> Outcome for std::sync::Arc<O> {
    fn error(&self) -> Option<&ExecutionError> {
        (**self).error()
    }

    fn succeeded(&self) -> bool {
        (**self).succeeded()
    }
}
