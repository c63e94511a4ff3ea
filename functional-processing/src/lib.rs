//! # Functional Processing
//!
//! Result types for request handlers that report failure by value instead of
//! by panicking or bubbling `?` through every layer.
//!
//! A handler returns an [`ExecutionResult<T>`] (or a [`VoidResult`] when there
//! is nothing to return). A failure carries an [`ExecutionError`]: ordered
//! messages, an optional error code, and the [`LogLevel`] the logging pipeline
//! should report it at.
//!
//! ## Modules
//!
//! - [`execution`] - construction helpers and [`combine`]
//! - [`execution_result`] - the result type and the [`Outcome`] capability
//! - [`error`] - the failure payload and edge/programmer error types
//! - [`fault`] - flattening `std::error::Error` chains into messages
//! - [`status_code`] - spaced text for status identifiers
//!
//! ## Example
//!
//! ```
//! use functional_processing::{failure_with_fault, success, ExecutionResult};
//!
//! fn parse_port(raw: &str) -> ExecutionResult<u16> {
//!     match raw.parse::<u16>() {
//!         Ok(port) => success(port),
//!         Err(e) => failure_with_fault("Invalid port", &e).with_error_code(400),
//!     }
//! }
//!
//! assert_eq!(*parse_port("8080").checked_value(), 8080);
//!
//! let failed = parse_port("eighty");
//! assert!(failed.failed());
//! assert_eq!(failed.checked_error().messages()[0], "Invalid port");
//! assert!(failed.throw_if_failed(Some("startup")).is_err());
//! ```

pub mod error;
pub mod execution;
pub mod execution_result;
pub mod fault;
pub mod log_level;
pub mod status_code;

pub use error::{AccessError, ExecutionError, ExecutionException, MESSAGE_SEPARATOR};
pub use execution::{
    combine, failure, failure_from, failure_from_fault, failure_with_fault, success,
    success_void,
};
pub use execution_result::{ExecutionResult, Outcome, VoidResult, UNKNOWN_ERROR};
pub use fault::{flatten, AggregateFault, BoxedFault};
pub use log_level::{LogLevel, ParseLogLevelError};
pub use status_code::{status_text, to_status_code_text};
