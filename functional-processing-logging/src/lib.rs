//! # Functional Processing Logging
//!
//! Pipeline support for handlers that return
//! [`ExecutionResult`](functional_processing::ExecutionResult)s, centred on
//! [`LoggingPipeline`]: a behavior that reports each failed result exactly
//! once, at the level the failure declares, no matter how many logging stages
//! the response passes through.
//!
//! ## Modules
//!
//! - [`pipeline`] - behaviors, handlers and the chain that runs them
//! - [`logging_pipeline`] - the exactly-once logging behavior
//! - [`sink`] - the per-level sink contract and the `tracing` sink
//! - [`config`] - Figment-backed configuration
//! - [`logging`] - tracing subscriber bootstrap
//!
//! ## Example
//!
//! ```
//! use functional_processing::{failure, ExecutionResult, LogLevel};
//! use functional_processing_logging::{handler_fn, LoggingPipeline, Pipeline};
//!
//! struct GetOrder(u64);
//!
//! # tokio_test::block_on(async {
//! let pipeline = Pipeline::new(handler_fn(|request: &GetOrder| {
//!     let id = request.0;
//!     async move {
//!         failure::<String>(format!("order {id} not found"))
//!             .with_error_code(404)
//!             .with_log_level(LogLevel::Warning)
//!     }
//! }))
//! .with_behavior(LoggingPipeline::for_request::<GetOrder>())
//! .with_behavior(LoggingPipeline::for_request::<GetOrder>());
//!
//! let result: ExecutionResult<String> = pipeline.send(&GetOrder(7)).await;
//! assert!(result.checked_error().is_logged());
//! # });
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod logging_pipeline;
pub mod pipeline;
pub mod sink;

pub use config::{load_configuration, ConfigFormat, ConfigProvider, LoggingConfig, ENV_PREFIX};
pub use error::{ConfigError, Result};
pub use logging::init_tracing;
pub use logging_pipeline::LoggingPipeline;
pub use pipeline::{handler_fn, FnHandler, Next, Pipeline, PipelineBehavior, RequestHandler};
pub use sink::{emit, LogSink, TracingSink};
