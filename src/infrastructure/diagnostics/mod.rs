//! Diagnostics of the library itself
//!
//! The crate reports its own trouble (transport I/O failures, rotation,
//! registration) through `tracing`, never through a `Logger`. Binaries opt in
//! to seeing those events by installing a subscriber:
//! stderr output, JSON or pretty, plus an optional daily-rotated JSON file.

pub mod config;
pub mod subscriber;

pub use config::DiagnosticsConfig;
pub use subscriber::Diagnostics;
