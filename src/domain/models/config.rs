use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::level::LogLevel;

/// Default rotation size of file transports (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5_242_880;

/// Default number of rotated archives kept by file transports.
pub const DEFAULT_MAX_FILES: usize = 10;

/// Root logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggerConfig {
    /// Package owning the hierarchy (required to build a root logger)
    #[serde(default)]
    pub package_name: Option<String>,

    /// Package version (required to build a root logger)
    #[serde(default)]
    pub package_version: Option<String>,

    /// Base directory for file and tail transports
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    /// File transport rotation size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Rotated files kept per file transport
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Drop every record (useful in test suites of embedding applications)
    #[serde(default)]
    pub silent: bool,

    /// Initial focus tag
    #[serde(default)]
    pub focus: Option<String>,

    /// Redaction paths registered at startup
    #[serde(default)]
    pub filters: Vec<String>,

    /// Transports registered at startup
    #[serde(default)]
    pub transports: TransportsConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            package_name: None,
            package_version: None,
            directory: default_log_directory(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            silent: false,
            focus: None,
            filters: vec![],
            transports: TransportsConfig::default(),
        }
    }
}

/// Transports to register when building a logger from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransportsConfig {
    /// Console transport threshold
    #[serde(default)]
    pub console: Option<LogLevel>,

    /// Tail file transport threshold
    #[serde(default)]
    pub tail: Option<LogLevel>,

    /// Bridge into the process-wide `tracing` subscriber
    #[serde(default)]
    pub tracing: Option<LogLevel>,

    /// One JSON file transport per listed level
    #[serde(default)]
    pub file: Vec<LogLevel>,

    /// Remote HTTP transport
    #[serde(default)]
    pub http: Option<HttpTransportConfig>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpTransportConfig {
    #[serde(default = "default_http_level")]
    pub level: LogLevel,

    pub url: String,

    /// Extra request headers, e.g. an authorization token
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

/// `<home>/logs`, or `./logs` when no home directory is known.
pub fn default_log_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

fn default_http_level() -> LogLevel {
    LogLevel::Info
}
