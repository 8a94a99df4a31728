//! Error types for logger construction, derivation and configuration.

use std::convert::Infallible;
use thiserror::Error;

use super::models::session::Session;

/// Validation failures raised synchronously by logger operations.
///
/// None of these are ever logged by the library itself; they go straight back
/// to the caller.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger needs to be initialized with [ package_name ] and [ package_version ]")]
    Configuration,

    #[error("Invalid context [ {0} ]")]
    InvalidContext(String),

    #[error("Invalid session [ {0} ]")]
    InvalidSession(String),

    #[error("Session already exists [ {} ]", .existing.to_compact_json())]
    SessionAlreadyExists { existing: Session },

    #[error("Session does not exist")]
    SessionNotFound,

    #[error("Failed to set up {kind} transport: {reason}")]
    Transport { kind: &'static str, reason: String },
}

impl LoggerError {
    pub(crate) fn transport(kind: &'static str, reason: impl ToString) -> Self {
        Self::Transport {
            kind,
            reason: reason.to_string(),
        }
    }
}

impl From<Infallible> for LoggerError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type LoggerResult<T> = Result<T, LoggerError>;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, verbose, debug, silly")]
    InvalidLogLevel(String),

    #[error("Package name cannot be empty")]
    EmptyPackageName,

    #[error("Package version cannot be empty")]
    EmptyPackageVersion,

    #[error("Invalid max_file_size: {0}. Must be at least 1")]
    InvalidMaxFileSize(u64),

    #[error("Invalid max_files: {0}. Must be at least 1")]
    InvalidMaxFiles(usize),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_already_exists_message_carries_session() {
        let err = LoggerError::SessionAlreadyExists {
            existing: Session::new().with("id", "1"),
        };
        assert_eq!(err.to_string(), r#"Session already exists [ {"id":"1"} ]"#);
    }

    #[test]
    fn test_configuration_message() {
        assert_eq!(
            LoggerError::Configuration.to_string(),
            "logger needs to be initialized with [ package_name ] and [ package_version ]"
        );
    }
}
