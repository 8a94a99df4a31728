//! Domain models for log records and logger state.

pub mod config;
pub mod context;
pub mod details;
pub mod level;
pub mod record;
pub mod session;

pub use config::{HttpTransportConfig, LoggerConfig, TransportsConfig};
pub use context::ContextSegments;
pub use details::{Details, ErrorDetails};
pub use level::LogLevel;
pub use record::{LogEntry, LogRecord, PackageInfo};
pub use session::{MetadataValue, Session, SessionMetadata};
