use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use super::config::DiagnosticsConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installed diagnostics subscriber; keep it alive for the process lifetime
/// so buffered file output is flushed.
pub struct Diagnostics {
    _guard: Option<WorkerGuard>,
}

impl Diagnostics {
    /// Install the global subscriber
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a global subscriber is
    /// already installed
    pub fn init(config: &DiagnosticsConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;
        let filter = || {
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy()
        };

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if let Some(ref log_dir) = config.log_dir {
            let file_appender = rolling::daily(log_dir, "lineage.log");
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            // File output is always JSON
            layers.push(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_filter(filter())
                    .boxed(),
            );
        }

        let stderr = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter())
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter())
                .boxed()
        };
        layers.push(stderr);

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .context("failed to install diagnostics subscriber")?;

        tracing::debug!(
            level = %config.level,
            json = config.json,
            file_output = config.log_dir.is_some(),
            "diagnostics initialized"
        );

        Ok(Self { _guard: guard })
    }
}

/// Parse log level string to Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_log_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_log_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_log_level("error"), Ok(Level::ERROR)));
        assert!(matches!(parse_log_level("TRACE"), Ok(Level::TRACE)));
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_init_rejects_bad_level() {
        let config = DiagnosticsConfig {
            level: "loud".to_string(),
            ..DiagnosticsConfig::default()
        };
        assert!(Diagnostics::init(&config).is_err());
    }
}
