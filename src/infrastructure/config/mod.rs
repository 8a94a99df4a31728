//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides (`LINEAGE_` prefix)
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigLoader, ENV_PREFIX};
