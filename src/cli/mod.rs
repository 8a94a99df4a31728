//! Command-line interface for the `lineage` binary.

pub mod commands;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::LoggerConfig;
use crate::infrastructure::config::ConfigLoader;

/// Package identity used when the configuration does not name one.
pub const DEFAULT_PACKAGE_NAME: &str = "lineage";

/// Load configuration for a command, filling in the CLI's own package
/// identity when none is configured.
pub fn load_config(cli: &Cli) -> Result<LoggerConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    config
        .package_name
        .get_or_insert_with(|| DEFAULT_PACKAGE_NAME.to_string());
    config
        .package_version
        .get_or_insert_with(|| env!("CARGO_PKG_VERSION").to_string());
    Ok(config)
}

/// Report a command failure and exit.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "success": false, "error": err.to_string(), "causes": chain })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
