//! Log records before and after emission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::details::Details;
use super::level::LogLevel;
use super::session::Session;

/// Name and version of the package owning a logger hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// What a logger call site hands to the core.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub details: Details,
    /// Root-to-leaf order, never reordered or deduplicated
    pub context: Vec<String>,
    /// Empty when the emitting logger carries no session
    pub session: Session,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            details: Details::default(),
            context: Vec::new(),
            session: Session::default(),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<Details>) -> Self {
        self.details = details.into();
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: Vec<String>) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }
}

/// A finished record as delivered to transports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    #[serde(rename = "time")]
    pub timestamp: DateTime<Utc>,
    pub package: PackageInfo,
    pub message: String,
    pub details: Details,
    pub context: Vec<String>,
    pub session: Session,
}

impl LogRecord {
    /// Finish an entry whose details have already been redacted.
    pub fn finish(entry: LogEntry, package: PackageInfo, timestamp: DateTime<Utc>) -> Self {
        Self {
            level: entry.level,
            timestamp,
            package,
            message: entry.message,
            details: entry.details,
            context: entry.context,
            session: entry.session,
        }
    }

    /// Context joined with `:` as shown by the readable formatter.
    pub fn context_label(&self) -> String {
        self.context.join(":")
    }

    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_record_wire_shape() {
        let mut details = serde_json::Map::new();
        details.insert("mock".to_string(), json!("details"));

        let entry = LogEntry::new(LogLevel::Silly, "message")
            .with_details(details)
            .with_context(vec!["context".to_string()])
            .with_session(Session::new().with("mock", "session"));
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let record = LogRecord::finish(entry, PackageInfo::new("package-name", "0.0.1"), timestamp);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "level": "silly",
                "time": "2024-01-02T03:04:05Z",
                "package": {"name": "package-name", "version": "0.0.1"},
                "message": "message",
                "details": {"mock": "details"},
                "context": ["context"],
                "session": {"mock": "session"},
            })
        );
    }

    #[test]
    fn test_context_label() {
        let entry = LogEntry::new(LogLevel::Info, "m")
            .with_context(vec!["a".to_string(), "b".to_string()]);
        let record = LogRecord::finish(entry, PackageInfo::new("p", "1"), Utc::now());
        assert_eq!(record.context_label(), "a:b");
    }
}
