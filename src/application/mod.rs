//! Application layer: the logger hierarchy and its emission pipeline
//!
//! - `logger`: `Logger` handles and their derivation rules
//! - `log_core`: shared state and the `emit` pipeline
//! - `filter_gate`: focus-based suppression
//! - `redaction`: path-based field redaction

pub mod filter_gate;
pub mod log_core;
pub mod logger;
pub mod redaction;

pub use filter_gate::should_suppress;
pub use log_core::{CoreSettings, LogCore};
pub use logger::{Logger, LoggerOptions};
pub use redaction::{redact, RedactionRule, RedactionTransform, FILTERED_MARKER};
