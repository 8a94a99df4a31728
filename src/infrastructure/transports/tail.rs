use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

use super::format::readable;
use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// Readable, uncoloured lines appended to a file meant for `tail -f`.
#[derive(Debug)]
pub struct TailTransport {
    level: LogLevel,
    path: PathBuf,
    file: Mutex<File>,
}

impl TailTransport {
    pub fn open(level: LogLevel, path: impl Into<PathBuf>) -> LoggerResult<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::transport("tail", e))?;

        Ok(Self {
            level,
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for TailTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(file, "{}", readable(record, false)) {
            warn!(path = %self.path.display(), error = %e, "tail transport failed to write record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogEntry, PackageInfo};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_writes_readable_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tail.svc.log");
        let transport = TailTransport::open(LogLevel::Info, &path).unwrap();

        let entry = LogEntry::new(LogLevel::Info, "served").with_context(vec!["http".to_string()]);
        transport.log(&LogRecord::finish(entry, PackageInfo::new("svc", "1.0"), Utc::now()));
        transport.log(&LogRecord::finish(
            LogEntry::new(LogLevel::Silly, "hidden"),
            PackageInfo::new("svc", "1.0"),
            Utc::now(),
        ));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO: served [ http ]"));
        assert!(!contents.contains("hidden"));
    }
}
