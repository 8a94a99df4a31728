//! JSON-lines file transport with size-based rotation.
//!
//! When a write would push the active file past `max_file_size`, the file is
//! renamed to `<name>.1`, older archives shift up by one, and anything beyond
//! `max_files` archives is deleted.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::{LogLevel, LogRecord};
use crate::domain::ports::Transport;

/// Overrides for a file transport; unset fields fall back to the root's
/// settings and the per-level default path.
#[derive(Debug, Clone, Default)]
pub struct FileTransportOptions {
    pub filename: Option<PathBuf>,
    pub max_file_size: Option<u64>,
    pub max_files: Option<usize>,
}

impl FileTransportOptions {
    #[must_use]
    pub fn filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.filename = Some(path.into());
        self
    }

    #[must_use]
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    #[must_use]
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }
}

#[derive(Debug)]
struct ActiveFile {
    file: File,
    size: u64,
}

/// Appends one JSON record per line to a file.
#[derive(Debug)]
pub struct FileTransport {
    level: LogLevel,
    path: PathBuf,
    max_file_size: u64,
    max_files: usize,
    active: Mutex<ActiveFile>,
}

impl FileTransport {
    pub fn open(
        level: LogLevel,
        path: impl Into<PathBuf>,
        max_file_size: u64,
        max_files: usize,
    ) -> LoggerResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LoggerError::transport("file", e))?;
        }
        let file = open_append(&path).map_err(|e| LoggerError::transport("file", e))?;
        let size = file
            .metadata()
            .map_err(|e| LoggerError::transport("file", e))?
            .len();

        Ok(Self {
            level,
            path,
            max_file_size,
            max_files,
            active: Mutex::new(ActiveFile { file, size }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rotate(&self, active: &mut ActiveFile) -> io::Result<()> {
        if self.max_files == 0 {
            active.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(&self.path)?;
            active.size = 0;
            return Ok(());
        }

        let oldest = archive_path(&self.path, self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = archive_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, archive_path(&self.path, index + 1))?;
            }
        }

        let rotated = archive_path(&self.path, 1);
        fs::rename(&self.path, &rotated)?;
        active.file = open_append(&self.path)?;
        active.size = 0;

        info!(
            old_path = %self.path.display(),
            new_path = %rotated.display(),
            "rotated log file"
        );
        Ok(())
    }
}

impl Transport for FileTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        let mut line = match record.to_json_line() {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "file transport failed to serialize record");
                return;
            }
        };
        line.push('\n');
        let len = line.len() as u64;

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.size > 0 && active.size + len > self.max_file_size {
            if let Err(e) = self.rotate(&mut active) {
                warn!(path = %self.path.display(), error = %e, "failed to rotate log file");
            }
        }

        match active.file.write_all(line.as_bytes()) {
            Ok(()) => active.size += len,
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "file transport failed to write record"
            ),
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// `app.log` + 2 -> `app.log.2`
fn archive_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogEntry, PackageInfo};
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(level: LogLevel, message: &str) -> LogRecord {
        LogRecord::finish(LogEntry::new(level, message), PackageInfo::new("svc", "1.0"), Utc::now())
    }

    #[test]
    fn test_appends_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("info.log");
        let transport = FileTransport::open(LogLevel::Info, &path, 1024 * 1024, 5).unwrap();

        transport.log(&record(LogLevel::Info, "first"));
        transport.log(&record(LogLevel::Debug, "below threshold"));
        transport.log(&record(LogLevel::Error, "second"));

        let contents = fs::read_to_string(&path).unwrap();
        let messages: Vec<String> = contents
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["message"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_rotates_when_size_exceeded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("info.log");
        let transport = FileTransport::open(LogLevel::Silly, &path, 10, 2).unwrap();

        transport.log(&record(LogLevel::Info, "one"));
        transport.log(&record(LogLevel::Info, "two"));
        transport.log(&record(LogLevel::Info, "three"));
        transport.log(&record(LogLevel::Info, "four"));

        assert!(fs::read_to_string(&path).unwrap().contains("four"));
        let newest = fs::read_to_string(archive_path(&path, 1)).unwrap();
        let oldest = fs::read_to_string(archive_path(&path, 2)).unwrap();
        assert!(newest.contains("three"));
        assert!(oldest.contains("two"));
        assert!(!archive_path(&path, 3).exists());
    }

    #[test]
    fn test_zero_archives_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("info.log");
        let transport = FileTransport::open(LogLevel::Silly, &path, 10, 0).unwrap();

        transport.log(&record(LogLevel::Info, "one"));
        transport.log(&record(LogLevel::Info, "two"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("one"));
        assert!(contents.contains("two"));
        assert!(!archive_path(&path, 1).exists());
    }

    #[test]
    fn test_archive_path() {
        assert_eq!(archive_path(Path::new("/logs/app.log"), 3), PathBuf::from("/logs/app.log.3"));
    }
}
