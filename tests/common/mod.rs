//! Common test utilities for integration tests
//!
//! Provides a capturing transport and logger fixtures shared across test files.

#![allow(dead_code)]

use lineage::{LogLevel, LogRecord, Logger, Transport};
use std::sync::{Arc, Mutex};

/// Transport keeping every record it accepts, for assertions.
#[derive(Clone)]
pub struct CaptureTransport {
    level: LogLevel,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl CaptureTransport {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl Transport for CaptureTransport {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Root logger for package `svc@1.0` with a capture transport at `silly`.
pub fn captured_root() -> (Logger, CaptureTransport) {
    let logger = Logger::root("svc", "1.0").expect("root logger");
    let capture = CaptureTransport::new(LogLevel::Silly);
    logger.add_transport(capture.clone());
    (logger, capture)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
