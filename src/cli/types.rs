//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::demo::DemoArgs;
use super::commands::emit::EmitArgs;

#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(about = "Lineage - hierarchical structured logging", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to lineage.yaml, lineage.local.yaml and LINEAGE_* variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write records as JSON lines on stdout instead of readable output
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Level of the library's own diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub diagnostics: String,

    /// Also write the library's diagnostics as JSON to a daily file in this directory
    #[arg(long, global = true)]
    pub diagnostics_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit a single record through a configured logger
    Emit(EmitArgs),

    /// Walk through context, session, focus and redaction behaviour
    Demo(DemoArgs),
}
