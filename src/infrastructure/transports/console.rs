use console::Term;
use tracing::warn;

use super::format::readable;
use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// Coloured, human-readable output on stdout.
#[derive(Debug)]
pub struct ConsoleTransport {
    level: LogLevel,
    term: Term,
}

impl ConsoleTransport {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            term: Term::stdout(),
        }
    }
}

impl Transport for ConsoleTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let colors = self.term.features().colors_supported();
        if let Err(e) = self.term.write_line(&readable(record, colors)) {
            warn!(error = %e, "console transport failed to write record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        let transport = ConsoleTransport::new(LogLevel::Info);
        assert!(transport.accepts(LogLevel::Error));
        assert!(transport.accepts(LogLevel::Info));
        assert!(!transport.accepts(LogLevel::Verbose));
    }
}
