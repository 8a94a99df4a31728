//! Domain layer for the lineage logger
//!
//! This module contains the record model, error taxonomy and the transport port.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ConfigError, LoggerError, LoggerResult};
