//! Shared core of a logger hierarchy.
//!
//! One `LogCore` is created per root logger and shared through `Arc` by every
//! logger derived from it. It owns the redaction rules, the transports and the
//! focus tag; `emit` runs the focus gate, redacts object details, stamps the
//! record and fans it out.

use chrono::Utc;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::filter_gate::should_suppress;
use super::redaction::{redact, RedactionRule};
use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::{Details, LogEntry, LogLevel, LogRecord, PackageInfo};
use crate::domain::ports::{SharedTransport, Transport};
use crate::infrastructure::transports::{
    ConsoleTransport, FileTransport, FileTransportOptions, HttpTransport, HttpTransportOptions,
    StreamTransport, TailTransport, TracingTransport,
};

/// Fixed settings of a hierarchy, taken from the root's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSettings {
    pub package: PackageInfo,
    /// Base directory for file and tail transports
    pub directory: PathBuf,
    /// Rotation size handed to file transports
    pub max_file_size: u64,
    /// Rotated archives kept by file transports
    pub max_files: usize,
    /// Drop every record without touching transports
    pub silent: bool,
}

#[derive(Default)]
struct CoreState {
    rules: Vec<RedactionRule>,
    transports: Vec<SharedTransport>,
    focus: Option<String>,
}

/// Transport-owning state shared by all loggers of one hierarchy.
pub struct LogCore {
    settings: CoreSettings,
    state: RwLock<CoreState>,
}

impl LogCore {
    pub fn new(settings: CoreSettings) -> Self {
        Self {
            settings,
            state: RwLock::new(CoreState::default()),
        }
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn package(&self) -> &PackageInfo {
        &self.settings.package
    }

    /// Gate, redact, stamp and dispatch one entry.
    ///
    /// The lock is released before transports run, so a transport may call
    /// back into the hierarchy.
    pub fn emit(&self, mut entry: LogEntry) {
        if self.settings.silent {
            return;
        }

        let transports = {
            let state = self.read_state();
            if should_suppress(&entry.context, state.focus.as_deref()) {
                return;
            }

            if let Details::Object(map) = &entry.details {
                if !state.rules.is_empty() {
                    let redacted = redact(map, &state.rules);
                    entry.details = Details::Object(redacted);
                }
            }

            state.transports.clone()
        };

        let record = LogRecord::finish(entry, self.settings.package.clone(), Utc::now());
        for transport in &transports {
            transport.log(&record);
        }
    }

    pub fn add_filter(&self, rule: RedactionRule) {
        debug!(path = rule.path(), "redaction rule registered");
        self.write_state().rules.push(rule);
    }

    /// Replace the focus tag; `None` or an empty tag clears it.
    pub fn set_focus(&self, focus: Option<&str>) {
        let focus = focus.filter(|tag| !tag.is_empty()).map(str::to_string);
        debug!(focus = ?focus, "focus changed");
        self.write_state().focus = focus;
    }

    pub fn focus(&self) -> Option<String> {
        self.read_state().focus.clone()
    }

    pub fn filter_count(&self) -> usize {
        self.read_state().rules.len()
    }

    pub fn transport_count(&self) -> usize {
        self.read_state().transports.len()
    }

    pub fn add_transport(&self, transport: SharedTransport) {
        debug!(level = %transport.level(), "transport registered");
        self.write_state().transports.push(transport);
    }

    pub fn add_console(&self, level: LogLevel) {
        self.add_transport(Arc::new(ConsoleTransport::new(level)));
    }

    pub fn add_tracing(&self, level: LogLevel) {
        self.add_transport(Arc::new(TracingTransport::new(level)));
    }

    pub fn add_tail(&self, level: LogLevel) -> LoggerResult<()> {
        let path = self
            .tail_path()
            .map_err(|e| LoggerError::transport("tail", e))?;
        let transport = TailTransport::open(level, path)?;
        self.add_transport(Arc::new(transport));
        Ok(())
    }

    pub fn add_file_transport(
        &self,
        level: LogLevel,
        options: FileTransportOptions,
    ) -> LoggerResult<()> {
        let path = match options.filename.clone() {
            Some(path) => path,
            None => self
                .file_path(level)
                .map_err(|e| LoggerError::transport("file", e))?,
        };
        let transport = FileTransport::open(
            level,
            path,
            options.max_file_size.unwrap_or(self.settings.max_file_size),
            options.max_files.unwrap_or(self.settings.max_files),
        )?;
        self.add_transport(Arc::new(transport));
        Ok(())
    }

    pub fn add_http_transport(
        &self,
        level: LogLevel,
        options: HttpTransportOptions,
    ) -> LoggerResult<()> {
        let transport = HttpTransport::new(level, options)?;
        self.add_transport(Arc::new(transport));
        Ok(())
    }

    pub fn add_stream_transport<W>(&self, level: LogLevel, writer: W)
    where
        W: Write + Send + 'static,
    {
        self.add_transport(Arc::new(StreamTransport::new(level, writer)));
    }

    /// `<directory>/<package segments without '@'>/<level>.log`
    pub fn file_path(&self, level: LogLevel) -> io::Result<PathBuf> {
        let mut dir = self.settings.directory.clone();
        for segment in self.settings.package.name.split('/') {
            dir.push(segment.replace('@', ""));
        }
        fs::create_dir_all(&dir)?;
        Ok(dir.join(format!("{level}.log")))
    }

    /// `<directory>/tail.<package name with '/' as '-' and no '@'>.log`
    pub fn tail_path(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.settings.directory)?;
        let name = self.settings.package.name.replace('/', "-").replace('@', "");
        Ok(self.settings.directory.join(format!("tail.{name}.log")))
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LogCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("LogCore")
            .field("settings", &self.settings)
            .field("filters", &state.rules.len())
            .field("transports", &state.transports.len())
            .field("focus", &state.focus)
            .finish()
    }
}
