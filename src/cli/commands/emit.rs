//! Implementation of the `lineage emit` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use crate::application::Logger;
use crate::domain::models::{Details, LogLevel, LoggerConfig};

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Message to log
    pub message: String,

    /// Severity of the record
    #[arg(short, long, default_value = "info")]
    pub level: LogLevel,

    /// Context segments, comma separated (e.g. http,orders)
    #[arg(long, value_delimiter = ',')]
    pub context: Vec<String>,

    /// Details as a JSON object
    #[arg(short, long)]
    pub details: Option<String>,

    /// Session as a JSON object
    #[arg(short, long)]
    pub session: Option<String>,

    /// Redact the value at this dotted path (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Only emit when the context contains this tag
    #[arg(long)]
    pub focus: Option<String>,
}

pub fn execute(args: EmitArgs, config: &LoggerConfig, json_mode: bool) -> Result<()> {
    let root = build_root(config, json_mode)?;

    for path in &args.filters {
        root.add_filter(path.as_str());
    }
    if args.focus.is_some() {
        root.set_focus(args.focus.as_deref());
    }

    let mut logger = root.derive_child(args.context)?;
    if let Some(raw) = &args.session {
        logger = logger.derive_session(parse_json(raw, "session")?)?;
    }

    let details = match &args.details {
        Some(raw) => parse_details(raw)?,
        None => Details::default(),
    };

    logger.log(args.level, args.message, details);
    Ok(())
}

/// Root logger for a command, with stdout output attached.
///
/// In JSON mode stdout carries JSON lines only, so a configured console
/// transport is left out.
pub(crate) fn build_root(config: &LoggerConfig, json_mode: bool) -> Result<Logger> {
    let root = if json_mode {
        let mut config = config.clone();
        config.transports.console = None;
        Logger::from_config(&config)
    } else {
        Logger::from_config(config)
    }
    .context("Failed to build logger from configuration")?;

    attach_stdout(&root, json_mode);
    Ok(root)
}

/// Console output unless JSON was asked for or the configuration already
/// routes records somewhere.
fn attach_stdout(logger: &Logger, json_mode: bool) {
    if json_mode {
        logger.add_stream_transport(LogLevel::Silly, std::io::stdout());
    } else if logger.core().transport_count() == 0 {
        logger.add_console(LogLevel::Silly);
    }
}

fn parse_json(raw: &str, what: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--{what} is not valid JSON"))
}

fn parse_details(raw: &str) -> Result<Details> {
    match parse_json(raw, "details")? {
        Value::Object(map) => Ok(Details::Object(map)),
        other => bail!("--details must be a JSON object, got {other}"),
    }
}
