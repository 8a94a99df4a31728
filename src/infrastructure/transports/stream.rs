use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// JSON lines written to any writer (socket, pipe, buffer, ...).
pub struct StreamTransport {
    level: LogLevel,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamTransport {
    pub fn new<W>(level: LogLevel, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            level,
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl std::fmt::Debug for StreamTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransport")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl Transport for StreamTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let line = match record.to_json_line() {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stream transport failed to serialize record");
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!(error = %e, "stream transport failed to write record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogEntry, PackageInfo};
    use chrono::Utc;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_json_lines_at_or_above_threshold() {
        let buffer = SharedBuffer::default();
        let transport = StreamTransport::new(LogLevel::Info, buffer.clone());
        let package = PackageInfo::new("svc", "1.0");

        let hidden = LogEntry::new(LogLevel::Debug, "hidden");
        let shown = LogEntry::new(LogLevel::Warn, "shown");
        transport.log(&LogRecord::finish(hidden, package.clone(), Utc::now()));
        transport.log(&LogRecord::finish(shown, package, Utc::now()));

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["message"], "shown");
        assert_eq!(value["level"], "warn");
        assert_eq!(value["package"]["name"], "svc");
    }
}
