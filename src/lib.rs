//! Lineage - hierarchical structured logging
//!
//! Loggers form a hierarchy: a root is created for a package, children append
//! context segments, and a session logger attaches request/correlation data
//! inherited by everything derived from it. Every logger of a hierarchy shares
//! one core holding the transports, the redaction rules and the focus tag.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): records, levels, sessions, errors, transport port
//! - **Application Layer** (`application`): loggers, the shared core, focus gate, redaction
//! - **Infrastructure Layer** (`infrastructure`): transports, configuration, diagnostics
//! - **CLI Layer** (`cli`): the `lineage` binary
//!
//! # Example
//!
//! ```no_run
//! use lineage::{LogLevel, Logger, Session};
//!
//! fn main() -> Result<(), lineage::LoggerError> {
//!     let logger = Logger::root("orders-service", "1.4.0")?;
//!     logger.add_console(LogLevel::Info);
//!     logger.add_filter("card.number");
//!
//!     let http = logger.derive_child(["http", "orders"])?;
//!     let request = http.derive_session(Session::new().with("request_id", "r-42"))?;
//!     request.info("order accepted");
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{redact, should_suppress, LogCore, Logger, LoggerOptions, RedactionRule};
pub use domain::errors::{ConfigError, LoggerError, LoggerResult};
pub use domain::models::{
    ContextSegments, Details, ErrorDetails, LogEntry, LogLevel, LogRecord, LoggerConfig,
    PackageInfo, Session, SessionMetadata,
};
pub use domain::ports::Transport;
pub use infrastructure::config::ConfigLoader;
pub use infrastructure::transports::{FileTransportOptions, HttpTransportOptions};
