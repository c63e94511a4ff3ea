//! Construction and combination of execution results
//!
//! Optional error codes and log levels are applied with
//! [`ExecutionResult::with_error_code`] and [`ExecutionResult::with_log_level`]:
//!
//! ```
//! use functional_processing::{failure, success, combine, LogLevel, Outcome};
//!
//! let found = success(42);
//! let missing = failure::<u32>("record not found")
//!     .with_error_code(404)
//!     .with_log_level(LogLevel::Warning);
//!
//! let combined = combine([&found as &dyn Outcome, &missing]);
//! assert!(combined.failed());
//! assert_eq!(combined.checked_error().error_code(), Some(404));
//! ```

use crate::error::ExecutionError;
use crate::execution_result::{ExecutionResult, Outcome, VoidResult};
use crate::fault::flatten;
use std::error::Error;

/// Successful result holding `value`
pub fn success<T>(value: T) -> ExecutionResult<T> {
    ExecutionResult::success(value)
}

/// Successful void result
pub const fn success_void() -> VoidResult {
    ExecutionResult::success(())
}

/// Failed result carrying `messages`
///
/// Accepts a single message (`&str`, `String`) or an ordered list of them.
pub fn failure<T>(messages: impl Into<ExecutionError>) -> ExecutionResult<T> {
    ExecutionResult::failure(messages)
}

/// Failed result whose messages are `message` followed by the flattened `fault`
pub fn failure_with_fault<T>(
    message: impl Into<String>,
    fault: &(dyn Error + 'static),
) -> ExecutionResult<T> {
    let messages = std::iter::once(message.into()).chain(flatten(fault));
    ExecutionResult::failure(ExecutionError::new(messages))
}

/// Failed result whose messages are the flattened `fault`
pub fn failure_from_fault<T>(fault: &(dyn Error + 'static)) -> ExecutionResult<T> {
    ExecutionResult::failure(ExecutionError::new(flatten(fault)))
}

/// Re-wrap a failure into a result of another payload type
///
/// Copies the messages and error code; a later
/// [`with_error_code`](ExecutionResult::with_error_code) overrides the code.
/// The new error starts at the default log level and unlogged.
///
/// # Panics
///
/// Panics with `MissingErrorAccess` if `other` carries no error.
pub fn failure_from<T, O>(other: &O) -> ExecutionResult<T>
where
    O: Outcome + ?Sized,
{
    let source = other.checked_error();
    let mut error = ExecutionError::new(source.messages().iter().cloned());
    if let Some(code) = source.error_code() {
        error = error.with_error_code(code);
    }
    ExecutionResult::failure(error)
}

/// Aggregate already-resolved results
///
/// Succeeds iff every input succeeded. Otherwise the failure holds every
/// input's messages in input order and the first error code found.
pub fn combine<'a, R, I>(results: I) -> VoidResult
where
    R: Outcome + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut all_succeeded = true;
    let mut messages = Vec::new();
    let mut error_code = None;

    for result in results {
        all_succeeded &= result.succeeded();
        if let Some(error) = result.error() {
            messages.extend(error.messages().iter().cloned());
            error_code = error_code.or(error.error_code());
        }
    }

    if all_succeeded {
        return success_void();
    }

    let error = ExecutionError::new(messages);
    match error_code {
        Some(code) => ExecutionResult::failure(error.with_error_code(code)),
        None => ExecutionResult::failure(error),
    }
}
