//! Logger handles: one position in a context/session hierarchy.

use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use super::log_core::{CoreSettings, LogCore};
use super::redaction::RedactionRule;
use crate::domain::errors::{LoggerError, LoggerResult};
use crate::domain::models::config::{
    default_log_directory, LoggerConfig, DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE,
};
use crate::domain::models::{
    ContextSegments, Details, LogEntry, LogLevel, PackageInfo, Session, SessionMetadata,
};
use crate::domain::ports::Transport;
use crate::infrastructure::transports::{FileTransportOptions, HttpTransportOptions};

/// Options for [`Logger::new`].
///
/// A root needs `package_name` and `package_version`; a child needs a
/// `parent` and ignores every root-only field.
#[derive(Debug, Default)]
pub struct LoggerOptions<'a> {
    pub parent: Option<&'a Logger>,
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    /// Appended to the inherited context
    pub context: ContextSegments,
    /// Replaces the inherited session when set
    pub session: Option<Session>,
    pub directory: Option<PathBuf>,
    pub max_file_size: Option<u64>,
    pub max_files: Option<usize>,
    pub silent: bool,
}

impl<'a> LoggerOptions<'a> {
    pub fn root(package_name: impl Into<String>, package_version: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
            package_version: Some(package_version.into()),
            ..Self::default()
        }
    }

    pub fn child_of(parent: &'a Logger) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<ContextSegments>) -> Self {
        self.context = context.into();
        self
    }

    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
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

    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// A cheaply cloned logging handle.
///
/// Each logger owns its context path and session; derivation copies them, so
/// siblings never see each other's changes. Filters, focus and transports
/// live in the shared [`LogCore`] and are visible to the whole hierarchy no
/// matter which logger registered them.
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<LogCore>,
    context: Vec<String>,
    session: Option<Session>,
}

impl Logger {
    pub fn new(options: LoggerOptions<'_>) -> LoggerResult<Self> {
        let LoggerOptions {
            parent,
            package_name,
            package_version,
            context: segments,
            session,
            directory,
            max_file_size,
            max_files,
            silent,
        } = options;

        let (core, mut context, inherited) = match parent {
            Some(parent) => (
                Arc::clone(&parent.core),
                parent.context.clone(),
                parent.session.clone(),
            ),
            None => {
                let (Some(name), Some(version)) = (package_name, package_version) else {
                    return Err(LoggerError::Configuration);
                };
                if name.is_empty() || version.is_empty() {
                    return Err(LoggerError::Configuration);
                }

                let settings = CoreSettings {
                    package: PackageInfo::new(name, version),
                    directory: directory.unwrap_or_else(default_log_directory),
                    max_file_size: max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
                    max_files: max_files.unwrap_or(DEFAULT_MAX_FILES),
                    silent,
                };
                (Arc::new(LogCore::new(settings)), Vec::new(), None)
            }
        };

        context.extend(segments.into_vec());

        Ok(Self {
            core,
            context,
            session: session.or(inherited),
        })
    }

    /// Root logger for a package with default settings.
    pub fn root(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
    ) -> LoggerResult<Self> {
        Self::new(LoggerOptions::root(package_name, package_version))
    }

    /// Root logger built from loaded configuration, with its transports,
    /// filters and focus registered.
    pub fn from_config(config: &LoggerConfig) -> LoggerResult<Self> {
        let logger = Self::new(LoggerOptions {
            package_name: config.package_name.clone(),
            package_version: config.package_version.clone(),
            directory: Some(config.directory.clone()),
            max_file_size: Some(config.max_file_size),
            max_files: Some(config.max_files),
            silent: config.silent,
            ..LoggerOptions::default()
        })?;

        for path in &config.filters {
            logger.add_filter(path.as_str());
        }
        logger.set_focus(config.focus.as_deref());

        let transports = &config.transports;
        if let Some(level) = transports.console {
            logger.add_console(level);
        }
        if let Some(level) = transports.tracing {
            logger.add_tracing(level);
        }
        if let Some(level) = transports.tail {
            logger.add_tail(level)?;
        }
        for level in &transports.file {
            logger.add_file_transport(*level, FileTransportOptions::default())?;
        }
        if let Some(http) = &transports.http {
            logger.add_http_transport(
                http.level,
                HttpTransportOptions::new(http.url.clone()).headers(http.headers.clone()),
            )?;
        }

        Ok(logger)
    }

    /// Child logger with `context` appended to this logger's context.
    ///
    /// Accepts a string, a sequence of strings, or a JSON value holding one
    /// of those; any other JSON shape is rejected with `InvalidContext`.
    pub fn derive_child<C>(&self, context: C) -> LoggerResult<Self>
    where
        C: TryInto<ContextSegments>,
        C::Error: Into<LoggerError>,
    {
        let segments = context.try_into().map_err(Into::into)?;
        Self::new(LoggerOptions::child_of(self).context(segments))
    }

    /// Logger carrying `session`. A lineage gets at most one session.
    pub fn derive_session<S>(&self, session: S) -> LoggerResult<Self>
    where
        S: TryInto<Session>,
        S::Error: Into<LoggerError>,
    {
        let session = session.try_into().map_err(Into::into)?;
        if let Some(existing) = &self.session {
            return Err(LoggerError::SessionAlreadyExists {
                existing: existing.clone(),
            });
        }
        Self::new(LoggerOptions::child_of(self).session(session))
    }

    /// Replace the `metadata` field of this logger's session.
    ///
    /// Only this handle changes; loggers derived earlier keep their copy.
    pub fn add_session_metadata(&mut self, metadata: SessionMetadata) -> LoggerResult<()> {
        let session = self.session.as_mut().ok_or(LoggerError::SessionNotFound)?;
        session.set_metadata(&metadata);
        Ok(())
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>, details: Details) {
        let entry = LogEntry {
            level,
            message: message.into(),
            details,
            context: self.context.clone(),
            session: self.session.clone().unwrap_or_default(),
        };
        self.core.emit(entry);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message, Details::default());
    }

    pub fn error_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Error, message, details.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message, Details::default());
    }

    pub fn warn_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Warn, message, details.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message, Details::default());
    }

    pub fn info_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Info, message, details.into());
    }

    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::Verbose, message, Details::default());
    }

    pub fn verbose_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Verbose, message, details.into());
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message, Details::default());
    }

    pub fn debug_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Debug, message, details.into());
    }

    pub fn silly(&self, message: impl Into<String>) {
        self.log(LogLevel::Silly, message, Details::default());
    }

    pub fn silly_with(&self, message: impl Into<String>, details: impl Into<Details>) {
        self.log(LogLevel::Silly, message, details.into());
    }

    // Hierarchy-wide settings, forwarded to the shared core.

    pub fn add_filter(&self, path: impl Into<String>) {
        self.core.add_filter(RedactionRule::new(path));
    }

    pub fn add_filter_with<F>(&self, path: impl Into<String>, transform: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.core.add_filter(RedactionRule::new(path).with_transform(transform));
    }

    pub fn set_focus(&self, focus: Option<&str>) {
        self.core.set_focus(focus);
    }

    pub fn add_console(&self, level: LogLevel) {
        self.core.add_console(level);
    }

    pub fn add_tracing(&self, level: LogLevel) {
        self.core.add_tracing(level);
    }

    pub fn add_tail(&self, level: LogLevel) -> LoggerResult<()> {
        self.core.add_tail(level)
    }

    pub fn add_file_transport(
        &self,
        level: LogLevel,
        options: FileTransportOptions,
    ) -> LoggerResult<()> {
        self.core.add_file_transport(level, options)
    }

    pub fn add_http_transport(
        &self,
        level: LogLevel,
        options: HttpTransportOptions,
    ) -> LoggerResult<()> {
        self.core.add_http_transport(level, options)
    }

    pub fn add_stream_transport<W>(&self, level: LogLevel, writer: W)
    where
        W: Write + Send + 'static,
    {
        self.core.add_stream_transport(level, writer);
    }

    pub fn add_transport<T>(&self, transport: T)
    where
        T: Transport + 'static,
    {
        self.core.add_transport(Arc::new(transport));
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn package(&self) -> &PackageInfo {
        self.core.package()
    }

    pub fn focus(&self) -> Option<String> {
        self.core.focus()
    }

    pub fn core(&self) -> &Arc<LogCore> {
        &self.core
    }

    /// Whether both loggers belong to the same hierarchy.
    pub fn shares_core_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}
