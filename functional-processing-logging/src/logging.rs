//! Tracing subscriber bootstrap

use crate::config::LoggingConfig;
use crate::error::{ConfigError, Result};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Install a global `fmt` subscriber filtered by `config.filter`
///
/// Returns `Ok(false)` when a global subscriber is already installed; the
/// existing one is kept.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;

    let installed = registry()
        .with(filter)
        .with(fmt::layer().with_ansi(config.ansi))
        .try_init()
        .is_ok();

    if installed {
        debug!(filter = %config.filter, "Tracing initialized");
    }
    Ok(installed)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.filter).map_err(|e| ConfigError::InvalidFilter {
        filter: config.filter.clone(),
        message: e.to_string(),
    })
}
