//! Lineage CLI entry point.

use clap::Parser;

use lineage::cli::{self, Cli, Commands};
use lineage::infrastructure::diagnostics::{Diagnostics, DiagnosticsConfig};

fn main() {
    let cli = Cli::parse();

    let diagnostics = Diagnostics::init(&DiagnosticsConfig {
        level: cli.diagnostics.clone(),
        json: cli.json,
        log_dir: cli.diagnostics_dir.clone(),
    });
    let _diagnostics = match diagnostics {
        Ok(guard) => guard,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Emit(args) => cli::commands::emit::execute(args, &config, cli.json),
        Commands::Demo(args) => cli::commands::demo::execute(args, &config, cli.json),
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
