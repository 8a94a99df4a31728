//! Concrete transports
//!
//! - Console: readable, coloured lines on stdout
//! - Tail: readable lines appended to a single file
//! - File: JSON lines with size-based rotation
//! - Http: JSON POSTs from a background worker
//! - Stream: JSON lines to any writer
//! - Tracing: re-emission as `tracing` events

pub mod console;
pub mod file;
pub mod format;
pub mod http;
pub mod stream;
pub mod tail;
pub mod tracing_bridge;

pub use console::ConsoleTransport;
pub use file::{FileTransport, FileTransportOptions};
pub use format::readable;
pub use http::{HttpTransport, HttpTransportOptions};
pub use stream::StreamTransport;
pub use tail::TailTransport;
pub use tracing_bridge::TracingTransport;
