use std::sync::Arc;

use crate::domain::models::{LogLevel, LogRecord};

/// Output sink for finished log records.
///
/// Each transport owns its minimum severity; the core hands every record to
/// every transport and the threshold is applied here, in `log`. Failures while
/// writing are the transport's business: implementations report them through
/// `tracing` and never panic.
pub trait Transport: Send + Sync {
    /// Minimum severity this transport accepts.
    fn level(&self) -> LogLevel;

    /// Render or ship one record that already passed the threshold.
    fn write(&self, record: &LogRecord);

    fn accepts(&self, level: LogLevel) -> bool {
        level.is_at_least(self.level())
    }

    fn log(&self, record: &LogRecord) {
        if self.accepts(record.level) {
            self.write(record);
        }
    }
}

/// Transports are shared between the core and dispatch snapshots.
pub type SharedTransport = Arc<dyn Transport>;
