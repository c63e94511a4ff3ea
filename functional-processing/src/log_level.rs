//! Log level carried by an [`ExecutionError`](crate::ExecutionError)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level at which a failure is reported by the logging pipeline
///
/// Levels are ordered from least to most severe. [`LogLevel::None`] sorts
/// last and suppresses pipeline logging entirely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum LogLevel {
    Trace,
    Debug,
    Information,
    Warning,
    /// Default level for failures
    #[default]
    Error,
    Critical,
    /// Never logged
    None,
}

impl LogLevel {
    /// All levels in ascending order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Information,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::None,
    ];

    /// Lowercase name, matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::None => "none",
        }
    }

    /// Whether a failure at this level is eligible for logging at all
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`LogLevel`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "information" | "info" => Ok(Self::Information),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "none" | "off" => Ok(Self::None),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}
