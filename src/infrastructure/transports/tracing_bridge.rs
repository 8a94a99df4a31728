use tracing::Level;

use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// Re-emits records as `tracing` events under the `lineage` target.
///
/// Verbose and debug both map to `DEBUG`, silly maps to `TRACE`.
#[derive(Debug, Clone, Copy)]
pub struct TracingTransport {
    level: LogLevel,
}

impl TracingTransport {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl Transport for TracingTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let package = record.package.name.as_str();
        let context = record.context_label();
        let details = serde_json::to_string(&record.details).unwrap_or_default();
        let message = record.message.as_str();

        macro_rules! emit {
            ($event:ident) => {
                tracing::$event!(
                    target: "lineage",
                    package = %package,
                    context = %context,
                    details = %details,
                    "{message}"
                )
            };
        }

        match record.level.as_tracing() {
            Level::ERROR => emit!(error),
            Level::WARN => emit!(warn),
            Level::INFO => emit!(info),
            Level::DEBUG => emit!(debug),
            _ => emit!(trace),
        }
    }
}
