//! Implementation of the `lineage demo` command.

use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};
use uuid::Uuid;

use super::emit::build_root;
use crate::application::Logger;
use crate::domain::models::{Details, LogLevel, LoggerConfig, SessionMetadata};

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Console threshold used by the walkthrough
    #[arg(short, long, default_value = "info")]
    pub level: LogLevel,
}

pub fn execute(args: DemoArgs, config: &LoggerConfig, json_mode: bool) -> Result<()> {
    let logger = if json_mode {
        build_root(config, true)?
    } else {
        let logger = Logger::from_config(config)?;
        logger.add_console(args.level);
        logger
    };

    let child1 = logger.derive_child(["context", "name"])?;
    let mut session = child1.derive_session(json!({ "id": Uuid::new_v4().to_string() }))?;
    let child2 = logger.derive_child("other")?;

    logger.verbose(format!(
        "this is hidden unless the threshold is verbose or lower (now {})",
        args.level
    ));
    logger.info("this is displayed");
    logger.warn("this is displayed as a warning");
    logger.error("this is displayed as an error");
    logger.info_with(
        "this is displayed with a details object",
        object(json!({ "details": "data" })),
    );

    logger.set_focus(Some("context"));
    child1.info("this is displayed because the context includes the focused tag");
    child2.info("this is not displayed because its context lacks the focused tag");
    session.add_session_metadata(SessionMetadata::new().with("step", "focus"))?;
    session.info("this is displayed because it derives from child1");

    logger.set_focus(None);
    child2.info("this is displayed because focus is cleared");

    logger.add_filter("credentials.password");
    child2.info_with(
        "the password below is redacted before reaching any transport",
        object(json!({ "credentials": { "user": "alice", "password": "hunter2" } })),
    );

    Ok(())
}

fn object(value: Value) -> Details {
    match value {
        Value::Object(map) => Details::Object(map),
        _ => Details::default(),
    }
}
