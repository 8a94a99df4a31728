//! Port trait definitions (Hexagonal Architecture)
//!
//! - Transport: a sink receiving finished log records
//!
//! Concrete transports live in `infrastructure::transports`.

pub mod transport;

pub use transport::{SharedTransport, Transport};
