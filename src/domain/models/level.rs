use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::ConfigError;

/// Severity of a log record.
///
/// Variants are declared from least to most severe so the derived ordering
/// matches severity: `Silly < Debug < Verbose < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Extremely chatty output
    Silly,
    /// Developer diagnostics
    Debug,
    /// Detailed operational output
    Verbose,
    /// Normal operational messages
    Info,
    /// Something unexpected that did not fail
    Warn,
    /// A failure
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Debug
    }
}

impl LogLevel {
    /// All levels, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Verbose,
        Self::Debug,
        Self::Silly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Silly => "silly",
        }
    }

    /// Whether a record at `self` passes a threshold of `threshold`.
    pub fn is_at_least(&self, threshold: Self) -> bool {
        *self >= threshold
    }

    /// Nearest `tracing` level, used when bridging records into tracing.
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Verbose | Self::Debug => tracing::Level::DEBUG,
            Self::Silly => tracing::Level::TRACE,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            "silly" => Ok(Self::Silly),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}
