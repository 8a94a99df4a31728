//! Infrastructure layer module
//!
//! This module contains the adapters around the logging core:
//! - Concrete transports (console, tail, file, HTTP, stream, tracing)
//! - Configuration management
//! - Diagnostics subscriber for the library's own events
//!
//! Transports implement the `Transport` port defined in the domain layer.

pub mod config;
pub mod diagnostics;
pub mod transports;

pub use config::ConfigLoader;
pub use diagnostics::{Diagnostics, DiagnosticsConfig};
